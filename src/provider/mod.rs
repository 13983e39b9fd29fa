//! Completion provider trait and the OpenAI-compatible implementation.

pub mod http;
pub mod openai;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ItineraError;
use crate::types::{
    ChatMessage, CompletionSettings, FinishReason, TextStreamDelta, ToolCall, ToolChoice, Usage,
};

pub use openai::OpenAiProvider;

/// A request sent to a completion backend.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ChatMessage>,
    pub settings: CompletionSettings,
    pub tools: Option<Vec<ToolDefinition>>,
    pub tool_choice: ToolChoice,
}

/// Tool definition sent to the backend API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a completion backend.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

/// Core trait implemented by completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Issue a single (non-streaming) completion.
    async fn complete(&self, request: &ProviderRequest) -> Result<ProviderResponse, ItineraError>;

    /// Issue a streaming completion.
    async fn stream(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, ItineraError>>, ItineraError>;
}

impl Default for ProviderRequest {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            settings: CompletionSettings::default(),
            tools: None,
            tool_choice: ToolChoice::Auto,
        }
    }
}
