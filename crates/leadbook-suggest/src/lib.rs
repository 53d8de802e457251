pub mod engine;
mod prompt;

pub use engine::{EngineError, LlmEngine, TextGenerator};
pub use prompt::{ProspectContext, DEFAULT_SERVICES, NO_WEBSITE};

use leadbook_core::{ai_configured, AiSettings, Client, ServiceOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Urgent,
}

/// Which of the three prompt templates to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    ColdCallScript,
    InteractionAnalysis,
    EmailDraft(Tone),
}

impl PromptKind {
    fn missing_key_text(&self) -> &'static str {
        match self {
            PromptKind::ColdCallScript => {
                "Error: API Key is missing. Please check your environment configuration."
            }
            PromptKind::InteractionAnalysis | PromptKind::EmailDraft(_) => {
                "Error: API Key is missing."
            }
        }
    }

    fn failure_text(&self) -> &'static str {
        match self {
            PromptKind::ColdCallScript => "Failed to generate script. Please try again.",
            PromptKind::InteractionAnalysis => "Failed to analyze notes.",
            PromptKind::EmailDraft(_) => "Failed to generate email.",
        }
    }

    fn empty_text(&self) -> &'static str {
        match self {
            PromptKind::ColdCallScript => "No response generated.",
            PromptKind::InteractionAnalysis => "No analysis generated.",
            PromptKind::EmailDraft(_) => "No email generated.",
        }
    }
}

/// Outcome of a generation request. Every variant carries renderable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum Generated {
    Text(String),
    /// No credential configured; no request was sent.
    MissingCredential(String),
    /// The remote call failed.
    Failed(String),
}

impl Generated {
    pub fn text(&self) -> &str {
        match self {
            Generated::Text(t) | Generated::MissingCredential(t) | Generated::Failed(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generated::Text(t) | Generated::MissingCredential(t) | Generated::Failed(t) => t,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Generated::Text(_))
    }
}

/// Render the prompt for `kind` and send it. Never fails: errors come back as
/// `Generated::MissingCredential` or `Generated::Failed`.
pub async fn generate<G>(
    generator: &G,
    settings: &AiSettings,
    kind: PromptKind,
    context: &ProspectContext,
) -> Generated
where
    G: TextGenerator + ?Sized,
{
    if !ai_configured(settings) {
        tracing::warn!(?kind, provider = %settings.provider, "no ai credential configured");
        return Generated::MissingCredential(kind.missing_key_text().to_string());
    }

    let prompt = prompt::render(kind, context);
    tracing::info!(
        ?kind,
        provider = %settings.provider,
        model = %settings.model,
        "sending generation request"
    );

    match generator.complete(settings, &prompt).await {
        Ok(Some(text)) => {
            tracing::debug!(?kind, chars = text.len(), "generation succeeded");
            Generated::Text(text)
        }
        Ok(None) => Generated::Text(kind.empty_text().to_string()),
        Err(e) => {
            tracing::warn!(?kind, error = %e, "generation failed");
            Generated::Failed(kind.failure_text().to_string())
        }
    }
}

pub async fn generate_cold_call_script<G>(
    generator: &G,
    settings: &AiSettings,
    client: &Client,
    services: &[ServiceOption],
) -> Generated
where
    G: TextGenerator + ?Sized,
{
    let context = ProspectContext::from_client(client, services);
    generate(generator, settings, PromptKind::ColdCallScript, &context).await
}

pub async fn analyze_interaction_notes<G>(
    generator: &G,
    settings: &AiSettings,
    notes: &str,
) -> Generated
where
    G: TextGenerator + ?Sized,
{
    let context = ProspectContext::from_notes(notes);
    generate(generator, settings, PromptKind::InteractionAnalysis, &context).await
}

pub async fn generate_email_draft<G>(
    generator: &G,
    settings: &AiSettings,
    client: &Client,
    services: &[ServiceOption],
    tone: Tone,
) -> Generated
where
    G: TextGenerator + ?Sized,
{
    let context = ProspectContext::from_client(client, services);
    generate(generator, settings, PromptKind::EmailDraft(tone), &context).await
}
