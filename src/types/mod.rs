//! Shared type definitions.

pub mod generation;
pub mod message;
pub mod stream;
pub mod travel;
pub mod usage;

pub use generation::{CompletionSettings, FinishReason, ResponseFormat, ToolChoice};
pub use message::{ChatMessage, ContentPart, Role, ToolCall, ToolResult};
pub use stream::{StreamEventType, TextStreamDelta};
pub use travel::{
    Budget, DailyPlan, Location, PlaceCategory, ScheduleItem, TravelStyle, Trip, TripPeriod,
    TripStatus,
};
pub use usage::Usage;
