//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::ItineraError;

/// Default per-call deadline for external operations.
pub const EXTERNAL_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Wrap a future with a timeout. Expiry maps to [`ItineraError::Timeout`],
/// which the retry policy treats as transient.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, ItineraError>>,
) -> Result<T, ItineraError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ItineraError::Timeout(duration.as_millis() as u64)),
    }
}
