use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use leadbook_core::AiSettings;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("build LLM: {0}")]
    Build(String),
    #[error("chat: {0}")]
    Chat(String),
}

/// A remote text-generation backend.
///
/// Returns `Ok(None)` when the backend answered with no usable text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(
        &self,
        settings: &AiSettings,
        prompt: &str,
    ) -> Result<Option<String>, EngineError>;
}

fn map_backend(provider: &str) -> Result<LLMBackend, EngineError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(EngineError::UnknownProvider(other.to_string())),
    }
}

/// `TextGenerator` backed by the `llm` crate's provider clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct LlmEngine;

#[async_trait]
impl TextGenerator for LlmEngine {
    async fn complete(
        &self,
        settings: &AiSettings,
        prompt: &str,
    ) -> Result<Option<String>, EngineError> {
        let backend = map_backend(&settings.provider)?;

        let mut builder = LLMBuilder::new().backend(backend).model(&settings.model);

        if !settings.api_key.is_empty() {
            builder = builder.api_key(&settings.api_key);
        }

        let llm = builder
            .build()
            .map_err(|e| EngineError::Build(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| EngineError::Chat(e.to_string()))?;

        Ok(response.text().filter(|text| !text.trim().is_empty()))
    }
}
