//! Lenient JSON extraction from model replies.
//!
//! Models asked for JSON still wrap it in markdown fences or prose often
//! enough that strict parsing of the raw reply is a losing bet. Extraction
//! order: fenced code blocks first, then the widest `{...}` span.

use regex::Regex;
use std::sync::OnceLock;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fence regex"))
}

/// Extract the most plausible JSON object from a model reply.
///
/// Returns `None` when no object-shaped span exists at all.
pub fn extract_json_object(content: &str) -> Option<&str> {
    if content.is_empty() {
        return None;
    }

    // Fenced code blocks (```json ... ``` or ``` ... ```)
    for caps in fence_re().captures_iter(content) {
        if let Some(m) = caps.get(1) {
            let candidate = m.as_str().trim();
            if candidate.starts_with('{') && candidate.ends_with('}') {
                return Some(candidate);
            }
        }
    }

    // Widest brace span in the raw text
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end > start {
        return Some(&content[start..=end]);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json() {
        let reply = "Here you go:\n```json\n{\"daily_plans\": []}\n```\nEnjoy!";
        assert_eq!(extract_json_object(reply), Some("{\"daily_plans\": []}"));
    }

    #[test]
    fn extracts_bare_fence() {
        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(reply), Some("{\"a\": 1}"));
    }

    #[test]
    fn extracts_unfenced_object_with_prose() {
        let reply = "Sure! {\"a\": {\"b\": 2}} hope that helps";
        assert_eq!(extract_json_object(reply), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn fence_without_object_falls_through_to_span() {
        let reply = "```\nnot json\n```\n{\"x\": 1}";
        assert_eq!(extract_json_object(reply), Some("{\"x\": 1}"));
    }

    #[test]
    fn truncated_input_yields_widest_span() {
        // Truncated replies still produce a span; the caller's JSON parse
        // decides whether it is usable.
        let reply = "{\"daily_plans\": [{\"day\": 1}";
        assert_eq!(extract_json_object(reply), Some("{\"daily_plans\": [{\"day\": 1}"));
        assert!(serde_json::from_str::<serde_json::Value>(extract_json_object(reply).unwrap()).is_err());

        let reply2 = "{\"daily_plans\": [{\"day\": 1}]}extra";
        assert_eq!(
            extract_json_object(reply2),
            Some("{\"daily_plans\": [{\"day\": 1}]}")
        );
    }

    #[test]
    fn no_json_at_all() {
        assert_eq!(extract_json_object("not json at all"), None);
        assert_eq!(extract_json_object(""), None);
    }
}
