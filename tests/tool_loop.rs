//! Tool loop behavior under cooperative, failing, and runaway models.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::ScriptedProvider;
use itinera::error::ItineraError;
use itinera::orchestrator::run_tool_loop;
use itinera::tools::{AgentTool, Tool, ToolParameters, ToolRegistry};
use itinera::types::{ChatMessage, CompletionSettings, ContentPart, Role, ToolChoice};
use itinera::util::RetryPolicy;

fn registry() -> ToolRegistry {
    let echo = AgentTool::new(
        "echo",
        "echoes its input",
        ToolParameters::object().string("value", "value to echo", true).build(),
        |args| async move {
            let value = args.get_str("value")?.to_string();
            Ok(serde_json::json!({ "echoed": value }))
        },
    );
    let boom = AgentTool::new(
        "boom",
        "always fails",
        ToolParameters::object().build(),
        |_args| async {
            Err(ItineraError::ToolExecution {
                tool_name: "boom".into(),
                message: "kaboom".into(),
            })
        },
    );
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(echo), Arc::new(boom)];
    ToolRegistry::new(tools).unwrap()
}

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("you are a test assistant"),
        ChatMessage::user("hello"),
    ]
}

async fn run(provider: &ScriptedProvider, max_iterations: u32) -> itinera::ToolLoopResult {
    run_tool_loop(
        provider,
        messages(),
        &registry(),
        CompletionSettings::default(),
        max_iterations,
        &RetryPolicy::default(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn immediate_answer_takes_one_iteration() {
    let provider = ScriptedProvider::new(vec![ScriptedProvider::text_reply("바로 답합니다")]);
    let result = run(&provider, 3).await;
    assert_eq!(result.final_text, "바로 답합니다");
    assert_eq!(result.iterations, 1);
    assert!(result.tools_used.is_empty());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn tool_result_is_fed_back_in_order() {
    let provider = ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply("echo", serde_json::json!({"value": "ping"})),
        ScriptedProvider::text_reply("done"),
    ]);
    let result = run(&provider, 3).await;
    assert_eq!(result.final_text, "done");
    assert_eq!(result.tools_used, vec!["echo"]);
    assert_eq!(result.iterations, 2);

    // The second request carries the assistant tool call and its result
    let second = provider.request(1);
    let tool_msg = second
        .messages
        .iter()
        .find(|m| m.role == Role::Tool)
        .expect("tool result message");
    match &tool_msg.content[0] {
        ContentPart::ToolResult(tr) => {
            assert!(!tr.is_error);
            assert_eq!(tr.result["echoed"], "ping");
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn failing_handler_does_not_abort_the_loop() {
    let provider = ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply("boom", serde_json::json!({})),
        ScriptedProvider::text_reply("recovered anyway"),
    ]);
    let result = run(&provider, 3).await;
    assert_eq!(result.final_text, "recovered anyway");
    assert_eq!(result.tools_used, vec!["boom"]);

    let second = provider.request(1);
    let tool_msg = second.messages.iter().find(|m| m.role == Role::Tool).unwrap();
    match &tool_msg.content[0] {
        ContentPart::ToolResult(tr) => {
            assert!(tr.is_error);
            assert!(tr.result["error"].as_str().unwrap().contains("kaboom"));
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_tool_yields_error_payload() {
    let provider = ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply("teleport", serde_json::json!({})),
        ScriptedProvider::text_reply("그 기능은 없네요"),
    ]);
    let result = run(&provider, 3).await;
    assert_eq!(result.tools_used, vec!["teleport"]);

    let second = provider.request(1);
    let tool_msg = second.messages.iter().find(|m| m.role == Role::Tool).unwrap();
    match &tool_msg.content[0] {
        ContentPart::ToolResult(tr) => {
            assert!(tr.is_error);
            assert!(tr.result["error"].as_str().unwrap().contains("teleport"));
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn empty_response_triggers_recovery_completion() {
    let provider = ScriptedProvider::new(vec![
        ScriptedProvider::empty_reply(),
        ScriptedProvider::text_reply("복구된 답변"),
    ]);
    let result = run(&provider, 3).await;
    assert_eq!(result.final_text, "복구된 답변");
    assert_eq!(result.iterations, 1);
    // The recovery call goes out without tools
    let recovery = provider.request(1);
    assert!(recovery.tools.is_none());
    assert_eq!(recovery.tool_choice, ToolChoice::None);
}

#[tokio::test]
async fn last_iteration_forces_text_answer() {
    let provider = ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply("echo", serde_json::json!({"value": "1"})),
        ScriptedProvider::tool_call_reply("echo", serde_json::json!({"value": "2"})),
        ScriptedProvider::text_reply("최종 답변"),
    ]);
    let result = run(&provider, 3).await;
    assert_eq!(result.final_text, "최종 답변");
    assert_eq!(result.iterations, 3);
    assert_eq!(result.tools_used, vec!["echo", "echo"]);
    assert_eq!(provider.calls(), 3);
    assert_eq!(provider.request(0).tool_choice, ToolChoice::Auto);
    assert_eq!(provider.request(1).tool_choice, ToolChoice::Auto);
    assert_eq!(provider.request(2).tool_choice, ToolChoice::None);
}
