//! Iterative tool-calling loop.
//!
//! Drives the conversation state machine: request a completion, execute
//! any tool calls the model proposed, feed the results back, repeat until
//! the model produces a textual answer or the iteration budget runs out.

use tracing::{debug, info, warn};

use crate::error::{ItineraError, Result};
use crate::provider::{CompletionProvider, ProviderRequest};
use crate::tools::{ToolArguments, ToolRegistry};
use crate::types::{ChatMessage, CompletionSettings, ContentPart, Role, ToolChoice, Usage};
use crate::util::RetryPolicy;

/// Outcome of a tool loop run.
#[derive(Debug, Clone)]
pub struct ToolLoopResult {
    /// The model's final textual answer. Never empty: an empty answer
    /// triggers one forced no-tools recovery completion.
    pub final_text: String,
    /// Names of tools invoked, in execution order (including failed ones).
    pub tools_used: Vec<String>,
    /// Number of loop iterations consumed.
    pub iterations: u32,
    /// Accumulated token usage across all completions.
    pub usage: Usage,
}

/// Run the tool loop until the model answers with text.
///
/// Semantics:
/// - On the final permitted iteration tool choice is forced to `none`,
///   so the model must produce a textual answer.
/// - A response with neither text nor tool calls triggers one extra
///   no-tools recovery completion before returning.
/// - A failing tool handler does not abort the loop: the error becomes a
///   JSON payload fed back as that tool's result, and the model reacts.
/// - Tool results are appended in request order; the model never sees
///   out-of-order results.
pub async fn run_tool_loop(
    provider: &dyn CompletionProvider,
    initial_messages: Vec<ChatMessage>,
    registry: &ToolRegistry,
    settings: CompletionSettings,
    max_iterations: u32,
    retry: &RetryPolicy,
) -> Result<ToolLoopResult> {
    let catalog = registry.catalog();
    let mut messages = initial_messages;
    let mut tools_used = Vec::new();
    let mut usage = Usage::default();

    for iteration in 1..=max_iterations {
        let tool_choice = if iteration < max_iterations {
            ToolChoice::Auto
        } else {
            // force a textual answer on the last permitted iteration
            ToolChoice::None
        };

        debug!(iteration, max_iterations, "tool loop: requesting completion");
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: settings.clone(),
            tools: Some(catalog.clone()),
            tool_choice,
        };
        let response = retry.execute(|| provider.complete(&request)).await?;
        usage.merge(&response.usage);

        if response.tool_calls.is_empty() {
            if response.text.is_empty() {
                warn!(
                    iteration,
                    finish_reason = ?response.finish_reason,
                    "empty response with no tool calls, retrying without tools"
                );
                let recovery = ProviderRequest {
                    messages: messages.clone(),
                    settings: settings.clone(),
                    tools: None,
                    tool_choice: ToolChoice::None,
                };
                let retry_response = retry.execute(|| provider.complete(&recovery)).await?;
                usage.merge(&retry_response.usage);
                return Ok(ToolLoopResult {
                    final_text: retry_response.text,
                    tools_used,
                    iterations: iteration,
                    usage,
                });
            }

            return Ok(ToolLoopResult {
                final_text: response.text,
                tools_used,
                iterations: iteration,
                usage,
            });
        }

        // Record the assistant turn (text, if any, plus its tool calls)
        let mut assistant_content: Vec<ContentPart> = Vec::new();
        if !response.text.is_empty() {
            assistant_content.push(ContentPart::Text {
                text: response.text.clone(),
            });
        }
        for tc in &response.tool_calls {
            assistant_content.push(ContentPart::ToolCall(tc.clone()));
        }
        messages.push(ChatMessage {
            role: Role::Assistant,
            content: assistant_content,
        });

        // Execute each requested call, feeding results back in order
        for tc in &response.tool_calls {
            info!(tool = %tc.name, "executing tool");
            tools_used.push(tc.name.clone());

            let (result, is_error) = match registry.get(&tc.name) {
                Some(tool) => {
                    let args = ToolArguments::new(tc.arguments.clone());
                    match tool.execute(&args).await {
                        Ok(value) => (value, false),
                        Err(e) => {
                            warn!(tool = %tc.name, error = %e, "tool execution failed");
                            (serde_json::json!({"error": e.to_string()}), true)
                        }
                    }
                }
                None => {
                    warn!(tool = %tc.name, "unknown tool requested");
                    (
                        serde_json::json!({"error": format!("Unknown tool: {}", tc.name)}),
                        true,
                    )
                }
            };

            messages.push(ChatMessage::tool_result(tc.id.clone(), result, is_error));
        }
    }

    // Iteration budget exhausted mid-conversation; force a final answer.
    warn!(max_iterations, "tool loop budget exhausted, forcing final completion");
    let final_request = ProviderRequest {
        messages,
        settings,
        tools: None,
        tool_choice: ToolChoice::None,
    };
    let final_response = retry.execute(|| provider.complete(&final_request)).await?;
    usage.merge(&final_response.usage);

    if final_response.text.is_empty() {
        return Err(ItineraError::InvalidState(
            "model produced no text after forced completion".into(),
        ));
    }

    Ok(ToolLoopResult {
        final_text: final_response.text,
        tools_used,
        iterations: max_iterations,
        usage,
    })
}
