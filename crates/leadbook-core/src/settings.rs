//! Text-generation credentials, read once at startup.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER: &str = "google";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl AiSettings {
    /// Read settings from the process environment.
    ///
    /// `LEADBOOK_AI_PROVIDER` and `LEADBOOK_AI_MODEL` fall back to Gemini defaults.
    /// The key comes from `LEADBOOK_API_KEY`, then `API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let settings = AiSettings {
            provider: non_empty("LEADBOOK_AI_PROVIDER")
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            model: non_empty("LEADBOOK_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: non_empty("LEADBOOK_API_KEY")
                .or_else(|| non_empty("API_KEY"))
                .unwrap_or_default(),
        };
        tracing::debug!(
            provider = %settings.provider,
            model = %settings.model,
            has_key = !settings.api_key.is_empty(),
            "loaded ai settings"
        );
        settings
    }
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
