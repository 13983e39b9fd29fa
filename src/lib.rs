//! Itinera: agentic travel-itinerary synthesis.
//!
//! Turns a travel request (destination, dates, party, budget, styles)
//! into a complete day-by-day itinerary by orchestrating an LLM with
//! tool access to real-world data, and degrades to deterministic offline
//! generation whenever the model path fails.
//!
//! Main entry points:
//! - [`synthesis::Synthesizer`] builds a full [`types::travel::Trip`].
//! - [`agent::ConsultantAgent`] answers in-trip questions over a tool
//!   loop with streaming support.
//! - [`orchestrator::run_tool_loop`] is the underlying model ↔ tool
//!   execution loop.

pub mod adapters;
pub mod agent;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod synthesis;
pub mod tools;
pub mod types;
pub mod util;

pub use agent::{ChatReply, ConsultantAgent};
pub use config::ItineraConfig;
pub use error::{ItineraError, Result};
pub use orchestrator::{run_tool_loop, ToolLoopResult};
pub use provider::{CompletionProvider, OpenAiProvider, ProviderRequest, ProviderResponse};
pub use synthesis::{PlanRequest, Synthesizer};
pub use types::travel::Trip;
