//! Response Parser
//!
//! Extracts `METHOD /path` from free-form model output. Total: any input,
//! including the empty string, yields a descriptor.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{CallDescriptor, HttpMethod};

static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(GET|POST|DELETE|PUT|PATCH)\s+(/\S+)").expect("valid regex")
});

/// First `METHOD /path` occurrence in `text`, or the fallback descriptor
pub fn parse_response(text: &str) -> CallDescriptor {
    try_parse_response(text).unwrap_or_else(CallDescriptor::fallback)
}

/// Like `parse_response`, but reports whether anything matched
pub fn try_parse_response(text: &str) -> Option<CallDescriptor> {
    let caps = CALL_PATTERN.captures(text)?;
    let method = caps.get(1)?.as_str().parse::<HttpMethod>().ok()?;
    let path = caps.get(2)?.as_str();
    Some(CallDescriptor::new(method, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_garbage_fall_back() {
        assert_eq!(parse_response(""), CallDescriptor::fallback());
        assert_eq!(parse_response("garbage"), CallDescriptor::fallback());
        assert!(try_parse_response("I don't know").is_none());
    }

    #[test]
    fn test_lowercase_method_normalized() {
        let parsed = parse_response(" get /v1/x ");
        assert_eq!(parsed, CallDescriptor::new(HttpMethod::Get, "/v1/x"));
    }

    #[test]
    fn test_path_stops_at_whitespace() {
        let parsed = parse_response("POST /v1/accounts/{account_id}/orders extra text");
        assert_eq!(
            parsed,
            CallDescriptor::new(HttpMethod::Post, "/v1/accounts/{account_id}/orders")
        );
    }

    #[test]
    fn test_path_stops_at_newline() {
        let parsed = parse_response("DELETE /v1/accounts/1/orders/2\nbecause you asked");
        assert_eq!(
            parsed,
            CallDescriptor::new(HttpMethod::Delete, "/v1/accounts/1/orders/2")
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let parsed = parse_response("Answer: GET /v1/assets/SBER@MISX or maybe POST /v1/other");
        assert_eq!(
            parsed,
            CallDescriptor::new(HttpMethod::Get, "/v1/assets/SBER@MISX")
        );
    }

    #[test]
    fn test_query_string_kept_verbatim() {
        let parsed = parse_response(
            "GET /v1/instruments/SBER@MISX/bars?interval.start_time=2025-10-01T00:00:00Z&timeframe=TIME_FRAME_D",
        );
        assert_eq!(
            parsed.path,
            "/v1/instruments/SBER@MISX/bars?interval.start_time=2025-10-01T00:00:00Z&timeframe=TIME_FRAME_D"
        );
    }

    #[test]
    fn test_method_without_path_falls_back() {
        assert_eq!(parse_response("GET assets"), CallDescriptor::fallback());
        assert_eq!(parse_response("PATCH"), CallDescriptor::fallback());
    }

    #[test]
    fn test_markdown_wrapped_answer() {
        let parsed = parse_response("```\nPatch /v1/accounts/{account_id}\n```");
        assert_eq!(
            parsed,
            CallDescriptor::new(HttpMethod::Patch, "/v1/accounts/{account_id}")
        );
    }

    proptest! {
        #[test]
        fn prop_parse_is_total(text in ".*") {
            let descriptor = parse_response(&text);
            prop_assert!(descriptor.path.starts_with('/'));
            prop_assert!(!descriptor.path.chars().any(char::is_whitespace));
        }

        #[test]
        fn prop_well_formed_answer_roundtrips(
            idx in 0usize..5,
            segment in "[a-z0-9_{}@]{1,12}",
            noise in "[ \t]{1,3}",
        ) {
            let method = HttpMethod::ALL[idx];
            let path = format!("/v1/{segment}");
            let text = format!("{}{noise}{path}{noise}trailing words", method.as_str().to_lowercase());
            prop_assert_eq!(parse_response(&text), CallDescriptor::new(method, path));
        }
    }
}
