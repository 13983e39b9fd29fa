//! Environment-backed configuration.

use std::sync::Arc;

use crate::provider::{CompletionProvider, OpenAiProvider};

/// Runtime configuration, resolved once from the environment.
#[derive(Debug, Clone)]
pub struct ItineraConfig {
    /// OpenAI-compatible completion backend key. `None` means the AI path
    /// is unavailable and callers degrade to deterministic behavior.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    /// Places provider key. `None` routes place search to the offline
    /// knowledge base.
    pub places_api_key: Option<String>,
    pub exchange_base_url: String,
}

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EXCHANGE_BASE_URL: &str = "https://api.exchangerate-api.com/v4";

impl Default for ItineraConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: None,
            places_api_key: None,
            exchange_base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
        }
    }
}

impl ItineraConfig {
    /// Load from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            openai_base_url: std::env::var("OPENAI_BASE_URL").ok(),
            places_api_key: std::env::var("GOOGLE_PLACES_API_KEY").ok(),
            exchange_base_url: std::env::var("EXCHANGE_RATE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EXCHANGE_BASE_URL.to_string()),
        }
    }

    /// Whether the completion backend is configured.
    pub fn is_openai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Build the completion backend, or `None` when no key is set, in
    /// which case callers run on their deterministic paths.
    pub fn completion_provider(&self) -> Option<Arc<dyn CompletionProvider>> {
        self.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiProvider::new(
                self.openai_model.clone(),
                key.clone(),
                self.openai_base_url.clone(),
            )) as Arc<dyn CompletionProvider>
        })
    }
}
