//! Server-sent-events framing for chat streaming collaborators.
//!
//! Frame protocol: zero or more `data: <chunk>` frames, then a terminal
//! `data: [DONE]`, or `data: [ERROR] <message>` on failure.

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::ItineraError;

/// Terminal frame marking successful stream completion.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Format a text chunk as an SSE data frame.
pub fn data_frame(chunk: &str) -> String {
    format!("data: {chunk}\n\n")
}

/// Format an error as a terminal SSE frame.
pub fn error_frame(message: &str) -> String {
    format!("data: [ERROR] {message}\n\n")
}

/// Wrap a chunk stream into SSE frames with the terminal `[DONE]` /
/// `[ERROR]` convention. Errors terminate the stream.
pub fn frame_stream(
    inner: BoxStream<'static, Result<String, ItineraError>>,
) -> BoxStream<'static, String> {
    let framed = async_stream::stream! {
        futures::pin_mut!(inner);
        while let Some(item) = inner.next().await {
            match item {
                Ok(chunk) => yield data_frame(&chunk),
                Err(e) => {
                    yield error_frame(&e.to_string());
                    return;
                }
            }
        }
        yield DONE_FRAME.to_string();
    };
    Box::pin(framed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn frames_end_with_done() {
        let inner: BoxStream<'static, Result<String, ItineraError>> =
            Box::pin(stream::iter(vec![Ok("hello".to_string()), Ok("world".to_string())]));
        let frames: Vec<String> = frame_stream(inner).collect().await;
        assert_eq!(
            frames,
            vec![
                "data: hello\n\n".to_string(),
                "data: world\n\n".to_string(),
                DONE_FRAME.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn error_terminates_stream() {
        let inner: BoxStream<'static, Result<String, ItineraError>> = Box::pin(stream::iter(vec![
            Ok("partial".to_string()),
            Err(ItineraError::Stream("connection reset".into())),
            Ok("never".to_string()),
        ]));
        let frames: Vec<String> = frame_stream(inner).collect().await;
        assert_eq!(frames.len(), 2);
        assert!(frames[1].starts_with("data: [ERROR] "));
    }
}
