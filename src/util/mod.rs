//! Shared utilities.

pub mod json_extract;
pub mod retry;
pub mod sse;
pub mod timeout;

pub use retry::RetryPolicy;
pub use timeout::{with_timeout, EXTERNAL_CALL_TIMEOUT};
