//! Itinerary synthesis pipeline.
//!
//! Collects real-place data per travel style, asks the model for a strict
//! JSON itinerary, parses it leniently, and regenerates the trip from the
//! offline tables whenever the model path fails. `generate` only errors
//! on an invalid request, never on a degraded backend.

pub mod fallback;
pub mod parse;
pub mod prompt;

use std::sync::Arc;

use bon::Builder;
use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::adapters::{PlaceResult, PlacesAdapter};
use crate::adapters::knowledge;
use crate::error::{ItineraError, Result};
use crate::provider::{CompletionProvider, ProviderRequest};
use crate::types::travel::{Budget, DailyPlan, TravelStyle, Trip, TripPeriod, TripStatus};
use crate::types::{ChatMessage, CompletionSettings, ResponseFormat, ToolChoice};
use crate::util::RetryPolicy;

/// A trip synthesis request.
#[derive(Debug, Clone, Builder)]
pub struct PlanRequest {
    #[builder(into)]
    pub destination: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub travelers: u32,
    /// Budget per person for the whole trip, in whole currency units.
    pub budget_per_person: i64,
    pub styles: Vec<TravelStyle>,
    /// Accommodation anchor the daily plans start and end from.
    #[builder(into)]
    pub accommodation: Option<String>,
    /// Free-text preference passed through to the model.
    #[builder(into)]
    pub custom_preference: Option<String>,
}

impl PlanRequest {
    /// Total trip budget across all travelers.
    pub fn total_budget(&self) -> i64 {
        self.budget_per_person * i64::from(self.travelers)
    }
}

/// Synthesizes complete trips from a request.
pub struct Synthesizer {
    provider: Option<Arc<dyn CompletionProvider>>,
    places: Arc<PlacesAdapter>,
    retry: RetryPolicy,
}

impl Synthesizer {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, places: Arc<PlacesAdapter>) -> Self {
        Self {
            provider,
            places,
            retry: RetryPolicy::default(),
        }
    }

    /// Generate a complete trip.
    ///
    /// Model or provider failure degrades to the deterministic fallback;
    /// only an invalid request returns an error.
    pub async fn generate(&self, request: &PlanRequest) -> Result<Trip> {
        let period = TripPeriod::new(request.start, request.end)?;
        if !(1..=50).contains(&request.travelers) {
            return Err(ItineraError::InvalidArgument(format!(
                "traveler count out of range: {}",
                request.travelers
            )));
        }
        if request.styles.len() > 6 {
            return Err(ItineraError::InvalidArgument(format!(
                "too many travel styles: {}",
                request.styles.len()
            )));
        }

        let daily_plans = match &self.provider {
            Some(provider) => {
                let places = self.collect_places(request).await;
                match self.complete_plan(provider.as_ref(), request, &places).await {
                    Ok(Some(plans)) => plans,
                    Ok(None) => {
                        warn!(destination = %request.destination, "unusable itinerary reply, using fallback");
                        fallback::build_daily_plans(request)
                    }
                    Err(e) => {
                        warn!(destination = %request.destination, error = %e, "itinerary completion failed, using fallback");
                        fallback::build_daily_plans(request)
                    }
                }
            }
            None => {
                info!(destination = %request.destination, "no completion backend, using fallback");
                fallback::build_daily_plans(request)
            }
        };

        Ok(Trip {
            id: Trip::new_id(),
            destination: request.destination.clone(),
            period,
            travelers: request.travelers,
            budget: Budget {
                estimated: request.total_budget(),
                currency: "KRW".to_string(),
            },
            styles: request.styles.clone(),
            daily_plans,
            status: TripStatus::Upcoming,
            created_at: Utc::now(),
        })
    }

    /// Concurrent per-style place search. Search never hard-fails, so a
    /// degraded provider just contributes its offline results.
    async fn collect_places(&self, request: &PlanRequest) -> Vec<(TravelStyle, Vec<PlaceResult>)> {
        let styles: &[TravelStyle] = if request.styles.is_empty() {
            &[TravelStyle::Sightseeing]
        } else {
            &request.styles
        };

        let searches = styles.iter().map(|style| {
            let style = *style;
            let query = knowledge::style_query(style);
            let places = &self.places;
            let destination = &request.destination;
            async move {
                let results = places.search_places(query, destination, None, 5, 5.0).await;
                (style, results)
            }
        });
        join_all(searches).await
    }

    async fn complete_plan(
        &self,
        provider: &dyn CompletionProvider,
        request: &PlanRequest,
        places: &[(TravelStyle, Vec<PlaceResult>)],
    ) -> Result<Option<Vec<DailyPlan>>> {
        let provider_request = ProviderRequest {
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(prompt::build_user_prompt(request, places)),
            ],
            settings: CompletionSettings {
                max_tokens: Some(4000),
                temperature: Some(0.7),
                response_format: Some(ResponseFormat::JsonObject),
            },
            tools: None,
            tool_choice: ToolChoice::None,
        };

        let response = self
            .retry
            .execute(|| provider.complete(&provider_request))
            .await?;
        info!(
            destination = %request.destination,
            tokens = response.usage.total_tokens,
            "itinerary completion received"
        );
        Ok(parse::parse_daily_plans(&response.text, request))
    }
}
