//! Conversational travel consultant.
//!
//! Wraps the tool loop behind a chat surface: fixed system prompt,
//! optional trip context, trimmed history, and a four-tool catalog.
//! When no completion backend is configured (or the loop hard-fails) the
//! agent degrades to keyword-matched canned replies instead of erroring.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{info, warn};

use crate::adapters::{ExchangeAdapter, Phrasebook, PlacesAdapter};
use crate::adapters::knowledge;
use crate::error::{ItineraError, Result};
use crate::orchestrator::run_tool_loop;
use crate::provider::{CompletionProvider, ProviderRequest};
use crate::tools::{AgentTool, Tool, ToolParameters, ToolRegistry};
use crate::types::travel::Trip;
use crate::types::{ChatMessage, CompletionSettings, ToolChoice};
use crate::util::RetryPolicy;

/// Turns of history kept when assembling a request.
const HISTORY_LIMIT: usize = 10;
/// Tool loop budget for one chat turn.
const MAX_TOOL_ITERATIONS: u32 = 3;

const SYSTEM_PROMPT: &str = "당신은 여행 중인 사용자를 실시간으로 돕는 전문 여행 컨설턴트입니다.\n\
맛집, 관광지, 환율, 현지어 표현 등 여행 중 궁금한 것에 답합니다.\n\
필요하면 제공된 도구(장소 검색, 환율 조회, 번역, 현재 여행 정보)를 사용하세요.\n\
항상 한국어로, 친절하고 간결하게 답하세요.";

/// A completed chat turn.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    /// Tools invoked while producing the reply, in execution order.
    pub tools_used: Vec<String>,
}

/// Travel consultant agent.
pub struct ConsultantAgent {
    provider: Option<Arc<dyn CompletionProvider>>,
    registry: ToolRegistry,
    trip: Option<Arc<Trip>>,
    retry: RetryPolicy,
}

impl ConsultantAgent {
    /// Build an agent over the given backend and data adapters. `trip`
    /// provides the current-trip context when the user is mid-journey.
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        places: Arc<PlacesAdapter>,
        exchange: Arc<ExchangeAdapter>,
        phrasebook: Phrasebook,
        trip: Option<Trip>,
    ) -> Result<Self> {
        let trip = trip.map(Arc::new);
        let registry = build_registry(
            provider.clone(),
            places,
            exchange,
            phrasebook,
            trip.clone(),
        )?;
        Ok(Self {
            provider,
            registry,
            trip,
            retry: RetryPolicy::default(),
        })
    }

    /// Answer one user message, running tools as the model requests.
    ///
    /// Never fails: backend absence or a hard loop error degrades to a
    /// keyword-matched canned reply.
    pub async fn chat(&self, user_message: &str, history: &[ChatMessage]) -> ChatReply {
        let Some(provider) = &self.provider else {
            info!("no completion backend, using canned reply");
            return ChatReply {
                text: canned_reply(user_message).to_string(),
                tools_used: Vec::new(),
            };
        };

        let messages = self.assemble_messages(user_message, history);
        match run_tool_loop(
            provider.as_ref(),
            messages,
            &self.registry,
            chat_settings(),
            MAX_TOOL_ITERATIONS,
            &self.retry,
        )
        .await
        {
            Ok(result) => ChatReply {
                text: result.final_text,
                tools_used: result.tools_used,
            },
            Err(e) => {
                warn!(error = %e, "chat turn failed, using canned reply");
                ChatReply {
                    text: canned_reply(user_message).to_string(),
                    tools_used: Vec::new(),
                }
            }
        }
    }

    /// Answer one user message as a stream of text chunks.
    ///
    /// Tools are disabled on this path; degraded backends yield the
    /// canned reply as a single chunk.
    pub async fn chat_stream(
        &self,
        user_message: &str,
        history: &[ChatMessage],
    ) -> BoxStream<'static, Result<String>> {
        let canned = canned_reply(user_message).to_string();
        let Some(provider) = &self.provider else {
            return futures::stream::once(async move { Ok(canned) }).boxed();
        };

        let request = ProviderRequest {
            messages: self.assemble_messages(user_message, history),
            settings: chat_settings(),
            tools: None,
            tool_choice: ToolChoice::None,
        };

        match provider.stream(&request).await {
            Ok(deltas) => deltas
                .filter_map(|delta| async move {
                    match delta {
                        Ok(d) if d.text.is_empty() => None,
                        Ok(d) => Some(Ok(d.text)),
                        Err(e) => Some(Err(e)),
                    }
                })
                .boxed(),
            Err(e) => {
                warn!(error = %e, "stream setup failed, using canned reply");
                futures::stream::once(async move { Ok(canned) }).boxed()
            }
        }
    }

    fn assemble_messages(&self, user_message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len().min(HISTORY_LIMIT) + 2);
        messages.push(ChatMessage::system(self.system_prompt()));
        let start = history.len().saturating_sub(HISTORY_LIMIT);
        messages.extend_from_slice(&history[start..]);
        messages.push(ChatMessage::user(user_message));
        messages
    }

    fn system_prompt(&self) -> String {
        match &self.trip {
            Some(trip) => {
                let styles = trip
                    .styles
                    .iter()
                    .map(|s| knowledge::style_query(*s))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{SYSTEM_PROMPT}\n\n[현재 여행 정보]\n\
                     - 목적지: {}\n- 기간: {} ~ {} ({}일)\n- 인원: {}명\n\
                     - 예산: {} {}\n- 스타일: {styles}",
                    trip.destination,
                    trip.period.start,
                    trip.period.end,
                    trip.period.days(),
                    trip.travelers,
                    trip.budget.estimated,
                    trip.budget.currency,
                )
            }
            None => SYSTEM_PROMPT.to_string(),
        }
    }
}

fn chat_settings() -> CompletionSettings {
    CompletionSettings {
        max_tokens: Some(1000),
        temperature: Some(0.7),
        response_format: None,
    }
}

fn build_registry(
    provider: Option<Arc<dyn CompletionProvider>>,
    places: Arc<PlacesAdapter>,
    exchange: Arc<ExchangeAdapter>,
    phrasebook: Phrasebook,
    trip: Option<Arc<Trip>>,
) -> Result<ToolRegistry> {
    let default_location = trip
        .as_ref()
        .map(|t| t.destination.clone())
        .unwrap_or_else(|| knowledge::DEFAULT_DESTINATION.to_string());

    let search_places = {
        let places = places.clone();
        let default_location = default_location.clone();
        AgentTool::new(
            "search_places",
            "주변 장소(맛집, 관광지, 쇼핑 등)를 검색합니다.",
            ToolParameters::object()
                .string("query", "검색어 (예: 맛집, 온천, 포토스팟)", true)
                .string("location", "검색할 도시. 생략하면 현재 여행지.", false)
                .integer("max_results", "최대 결과 수 (기본 5)", false)
                .build(),
            move |args| {
                let places = places.clone();
                let default_location = default_location.clone();
                async move {
                    let query = args.get_str("query")?.to_string();
                    let location = args
                        .get_str_opt("location")
                        .unwrap_or(&default_location)
                        .to_string();
                    // model-supplied, so bounded before it reaches the adapter
                    let max_results = args
                        .raw()
                        .get("max_results")
                        .and_then(|v| v.as_u64())
                        .unwrap_or(5)
                        .clamp(1, 20) as usize;
                    let results = places
                        .search_places(&query, &location, None, max_results, 5.0)
                        .await;
                    Ok(serde_json::json!({ "places": results }))
                }
            },
        )
    };

    let get_exchange_rate = {
        let exchange = exchange.clone();
        AgentTool::new(
            "get_exchange_rate",
            "두 통화 간 환율을 조회합니다.",
            ToolParameters::object()
                .string("from_currency", "기준 통화 코드 (예: KRW)", true)
                .string("to_currency", "대상 통화 코드 (예: JPY)", true)
                .number("amount", "환산할 금액 (선택)", false)
                .build(),
            move |args| {
                let exchange = exchange.clone();
                async move {
                    let from = args.get_str("from_currency")?.to_string();
                    let to = args.get_str("to_currency")?.to_string();
                    let rate = exchange.get_exchange_rate(&from, &to).await;
                    let mut result = serde_json::to_value(&rate)?;
                    if let Some(amount) = args.get_f64_opt("amount") {
                        result["converted_amount"] =
                            serde_json::json!(exchange.convert_amount(amount, &rate));
                    }
                    Ok(result)
                }
            },
        )
    };

    let translate_text = {
        let provider = provider.clone();
        AgentTool::new(
            "translate_text",
            "여행 표현을 현지어로 번역합니다.",
            ToolParameters::object()
                .string("text", "번역할 문장", true)
                .string("target_language", "대상 언어 코드 (예: ja, en)", true)
                .string("source_language", "원문 언어 코드 (기본 ko)", false)
                .build(),
            move |args| {
                let provider = provider.clone();
                async move {
                    let text = args.get_str("text")?.to_string();
                    let target = args.get_str("target_language")?.to_string();
                    let source = args.get_str_opt("source_language").unwrap_or("ko").to_string();

                    let mut translation = phrasebook.translate(&text, &source, &target);
                    if translation.needs_ai_translation {
                        if let Some(provider) = &provider {
                            match ai_translate(provider.as_ref(), &text, &translation.target_language_name)
                                .await
                            {
                                Ok(translated) => {
                                    translation.translated = Some(translated);
                                    translation.needs_ai_translation = false;
                                }
                                Err(e) => {
                                    warn!(error = %e, "ai translation failed");
                                }
                            }
                        }
                    }
                    Ok(serde_json::to_value(&translation)?)
                }
            },
        )
    };

    let get_current_trip = {
        let trip = trip.clone();
        AgentTool::new(
            "get_current_trip",
            "현재 진행 중인 여행의 일정 정보를 조회합니다.",
            ToolParameters::object().build(),
            move |_args| {
                let trip = trip.clone();
                async move {
                    match trip {
                        Some(trip) => Ok(serde_json::to_value(trip.as_ref())?),
                        None => Ok(serde_json::json!({
                            "message": "진행 중인 여행이 없습니다."
                        })),
                    }
                }
            },
        )
    };

    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(search_places),
        Arc::new(get_exchange_rate),
        Arc::new(translate_text),
        Arc::new(get_current_trip),
    ];
    ToolRegistry::new(tools)
}

/// Escalate a phrase the static book does not cover to the model.
async fn ai_translate(
    provider: &dyn CompletionProvider,
    text: &str,
    target_language_name: &str,
) -> Result<String> {
    let request = ProviderRequest {
        messages: vec![
            ChatMessage::system(
                "여행자를 위한 번역가입니다. 번역 결과만 출력하고, 발음을 괄호로 덧붙이세요.",
            ),
            ChatMessage::user(format!("다음 문장을 {target_language_name}(으)로 번역: {text}")),
        ],
        settings: CompletionSettings {
            max_tokens: Some(200),
            temperature: Some(0.3),
            response_format: None,
        },
        tools: None,
        tool_choice: ToolChoice::None,
    };
    let response = provider.complete(&request).await?;
    if response.text.is_empty() {
        return Err(ItineraError::InvalidState("empty translation".into()));
    }
    Ok(response.text.trim().to_string())
}

/// Keyword-matched reply used when no backend is reachable.
fn canned_reply(message: &str) -> &'static str {
    if ["맛집", "음식", "먹", "레스토랑", "식당"]
        .iter()
        .any(|k| message.contains(k))
    {
        "현지에서 검증된 맛집을 찾으시는군요! 숙소 주변의 평점 높은 식당을 추천드려요. \
         구글맵에서 평점 4.0 이상, 리뷰 100개 이상인 곳을 고르시면 실패가 적습니다. \
         대기줄이 긴 곳은 현지인 맛집일 확률이 높아요."
    } else if ["환율", "돈", "원화", "엔화", "달러"]
        .iter()
        .any(|k| message.contains(k))
    {
        "환전 관련 문의시군요. 공항보다는 시내 환전소나 트래블카드가 수수료 면에서 유리합니다. \
         현지 ATM 출금도 소액 수수료로 환율이 좋은 편이에요."
    } else if ["번역", "말", "어떻게 말"].iter().any(|k| message.contains(k)) {
        "간단한 현지어 표현은 번역 앱의 오프라인 모드를 미리 받아두시면 편합니다. \
         '감사합니다', '얼마예요?' 같은 기본 표현 몇 가지만 외워도 여행이 한결 수월해져요."
    } else {
        "지금은 상세한 답변을 드리기 어렵네요. 잠시 후 다시 시도해 주세요. \
         여행 중 급한 문의라면 숙소 프런트나 현지 관광안내소도 큰 도움이 됩니다."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_reply_buckets() {
        assert!(canned_reply("근처 맛집 추천해줘").contains("맛집"));
        assert!(canned_reply("엔화 환율 어때?").contains("환전"));
        assert!(canned_reply("이거 일본어로 번역해줘").contains("번역"));
        assert!(canned_reply("오늘 날씨 어때?").contains("다시 시도"));
    }

    #[tokio::test]
    async fn no_backend_chat_degrades_to_canned() {
        let agent = ConsultantAgent::new(
            None,
            Arc::new(PlacesAdapter::new(None)),
            Arc::new(ExchangeAdapter::new("http://127.0.0.1:1".into())),
            Phrasebook::new(),
            None,
        )
        .unwrap();
        let reply = agent.chat("근처 맛집 추천해줘", &[]).await;
        assert!(reply.tools_used.is_empty());
        assert!(reply.text.contains("맛집"));
    }

    #[tokio::test]
    async fn no_backend_stream_is_single_chunk() {
        let agent = ConsultantAgent::new(
            None,
            Arc::new(PlacesAdapter::new(None)),
            Arc::new(ExchangeAdapter::new("http://127.0.0.1:1".into())),
            Phrasebook::new(),
            None,
        )
        .unwrap();
        let chunks: Vec<_> = agent.chat_stream("환율 알려줘", &[]).await.collect().await;
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].as_ref().unwrap().contains("환전"));
    }

    #[test]
    fn registry_exposes_the_four_tools() {
        let registry = build_registry(
            None,
            Arc::new(PlacesAdapter::new(None)),
            Arc::new(ExchangeAdapter::new(String::new())),
            Phrasebook::new(),
            None,
        )
        .unwrap();
        let names: Vec<_> = registry.catalog().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["search_places", "get_exchange_rate", "translate_text", "get_current_trip"]
        );
    }
}
