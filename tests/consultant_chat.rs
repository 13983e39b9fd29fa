//! Consultant agent chat turns over a scripted backend.

mod common;

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;

use common::ScriptedProvider;
use itinera::adapters::{ExchangeAdapter, Phrasebook, PlacesAdapter};
use itinera::agent::ConsultantAgent;
use itinera::types::{ChatMessage, ContentPart, Role};

fn agent_with(provider: Option<Arc<ScriptedProvider>>) -> ConsultantAgent {
    let provider = provider.map(|p| p as Arc<dyn itinera::CompletionProvider>);
    ConsultantAgent::new(
        provider,
        Arc::new(PlacesAdapter::new(None)),
        Arc::new(ExchangeAdapter::new("http://127.0.0.1:1".into())),
        Phrasebook::new(),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn chat_runs_requested_tools_then_answers() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply(
            "search_places",
            serde_json::json!({"query": "맛집", "location": "오사카"}),
        ),
        ScriptedProvider::text_reply("도톤보리의 이치란 라멘을 추천드려요."),
    ]));
    let agent = agent_with(Some(provider.clone()));

    let reply = agent.chat("오사카 맛집 알려줘", &[]).await;
    assert_eq!(reply.tools_used, vec!["search_places"]);
    assert!(reply.text.contains("이치란"));

    // The offline knowledge-base results reached the model
    let second = provider.request(1);
    let joined = serde_json::to_string(&second.messages).unwrap();
    assert!(joined.contains("이치란"));
}

#[tokio::test]
async fn oversized_search_request_does_not_abort_the_turn() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply(
            "search_places",
            serde_json::json!({"query": "맛집", "location": "오사카", "max_results": 50}),
        ),
        ScriptedProvider::text_reply("맛집 목록을 정리했어요."),
    ]));
    let agent = agent_with(Some(provider.clone()));

    let reply = agent.chat("오사카 맛집 전부 알려줘", &[]).await;
    assert_eq!(reply.tools_used, vec!["search_places"]);
    assert!(reply.text.contains("맛집"));

    // The handler clamps the request and returns a bounded, non-error result
    let second = provider.request(1);
    let tool_msg = second.messages.iter().find(|m| m.role == Role::Tool).unwrap();
    match &tool_msg.content[0] {
        ContentPart::ToolResult(tr) => {
            assert!(!tr.is_error);
            let places = tr.result["places"].as_array().unwrap();
            assert!(!places.is_empty());
            assert!(places.len() <= 20);
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn hard_failure_degrades_to_canned_reply() {
    // Empty script: the first completion errors
    let agent = agent_with(Some(Arc::new(ScriptedProvider::new(Vec::new()))));
    let reply = agent.chat("근처 맛집 추천해줘", &[]).await;
    assert!(reply.tools_used.is_empty());
    assert!(reply.text.contains("맛집"));
}

#[tokio::test]
async fn history_is_trimmed_to_the_last_ten_turns() {
    let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::text_reply("네!")]));
    let agent = agent_with(Some(provider.clone()));

    let history: Vec<ChatMessage> = (0..15)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::user(format!("turn {i}"))
            } else {
                ChatMessage::assistant(format!("turn {i}"))
            }
        })
        .collect();
    agent.chat("마지막 질문", &history).await;

    let request = provider.request(0);
    // system + 10 history turns + current user message
    assert_eq!(request.messages.len(), 12);
    assert_eq!(request.messages[1].text(), "turn 5");
    assert_eq!(request.messages[1].role, Role::Assistant);
    assert_eq!(request.messages[11].text(), "마지막 질문");
}

#[tokio::test]
async fn streaming_yields_model_chunks() {
    let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::text_reply(
        "환율은 100엔에 약 910원입니다.",
    )]));
    let agent = agent_with(Some(provider));

    let chunks: Vec<String> = agent
        .chat_stream("엔화 환율 알려줘", &[])
        .await
        .map(|c| c.unwrap())
        .collect()
        .await;
    assert!(chunks.len() > 1);
    assert_eq!(chunks.join(""), "환율은 100엔에 약 910원입니다.");
}

#[tokio::test]
async fn exchange_tool_reports_fallback_rates() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply(
            "get_exchange_rate",
            serde_json::json!({"from_currency": "KRW", "to_currency": "JPY"}),
        ),
        ScriptedProvider::text_reply("대략 1엔에 9.1원 정도예요."),
    ]));
    let agent = agent_with(Some(provider.clone()));

    let reply = agent.chat("엔화 환율 알려줘", &[]).await;
    assert_eq!(reply.tools_used, vec!["get_exchange_rate"]);

    // The unreachable rate provider forced the tagged fallback table
    let second = provider.request(1);
    let joined = serde_json::to_string(&second.messages).unwrap();
    assert!(joined.contains("\"is_fallback\":true"));
}

#[tokio::test]
async fn translate_tool_answers_from_the_phrasebook() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        ScriptedProvider::tool_call_reply(
            "translate_text",
            serde_json::json!({"text": "감사합니다", "target_language": "ja"}),
        ),
        ScriptedProvider::text_reply("「ありがとうございます」라고 하시면 됩니다."),
    ]));
    let agent = agent_with(Some(provider.clone()));

    let reply = agent.chat("감사합니다를 일본어로 어떻게 말해?", &[]).await;
    assert_eq!(reply.tools_used, vec!["translate_text"]);

    let second = provider.request(1);
    let joined = serde_json::to_string(&second.messages).unwrap();
    assert!(joined.contains("ありがとうございます"));
    assert!(joined.contains("\"needs_ai_translation\":false"));
}
