//! Shared test fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use itinera::error::ItineraError;
use itinera::provider::{CompletionProvider, ProviderRequest, ProviderResponse};
use itinera::types::{FinishReason, TextStreamDelta, ToolCall, Usage};

/// A completion backend that replays a fixed script of responses and
/// records every request it receives.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<ProviderResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text_reply(text: &str) -> ProviderResponse {
        ProviderResponse {
            text: text.to_string(),
            tool_calls: Vec::new(),
            finish_reason: Some(FinishReason::Stop),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 10,
                total_tokens: 20,
            },
        }
    }

    pub fn tool_call_reply(name: &str, arguments: serde_json::Value) -> ProviderResponse {
        ProviderResponse {
            text: String::new(),
            tool_calls: vec![ToolCall {
                id: format!("call_{name}"),
                name: name.to_string(),
                arguments,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
            usage: Usage::default(),
        }
    }

    pub fn empty_reply() -> ProviderResponse {
        ProviderResponse::default()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ProviderRequest) -> Result<ProviderResponse, ItineraError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ItineraError::Configuration("script exhausted".into()))
    }

    async fn stream(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, ItineraError>>, ItineraError> {
        let response = self.complete(request).await?;
        let chunks: Vec<_> = response
            .text
            .split_inclusive(' ')
            .map(|piece| Ok(TextStreamDelta::text(piece)))
            .collect();
        Ok(futures::stream::iter(chunks).boxed())
    }
}
