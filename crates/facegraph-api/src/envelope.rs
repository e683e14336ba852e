//! Detection and extraction of Graph API error envelopes
//!
//! Failing responses carry a body of the shape
//! `{"error": {"type": "...", "message": "..."}}`. The envelope can also
//! arrive with a 200 status, so bodies are sniffed by prefix in addition
//! to checking the status code.

use serde::Deserialize;

/// Body prefix that marks an error envelope regardless of status code
const ERROR_PREFIX: &str = "{\"error\":";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

/// The `error` object of a failing Graph API response.
///
/// The `type` field is usually `OAuthException` even for failures that have
/// nothing to do with OAuth, so only the message is worth keeping.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetails {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// Whether the body's first line starts with the error-envelope prefix
pub fn body_looks_like_error(body: &str) -> bool {
    body.lines()
        .next()
        .map(|line| line.starts_with(ERROR_PREFIX))
        .unwrap_or(false)
}

/// Extract error details from a response body.
///
/// Returns `None` when the body is not JSON or has no `error` key; a
/// malformed envelope means "no details available", never a parse failure.
pub fn extract_error_details(body: &str) -> Option<ErrorDetails> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_error_prefix_on_first_line() {
        assert!(body_looks_like_error(
            "{\"error\":{\"type\":\"OAuthException\",\"message\":\"x\"}}"
        ));
        assert!(body_looks_like_error("{\"error\":{}}\nsecond line"));
    }

    #[test]
    fn ignores_non_error_bodies() {
        assert!(!body_looks_like_error("{\"id\":\"123\"}"));
        assert!(!body_looks_like_error("plain text"));
        assert!(!body_looks_like_error(""));
        // prefix on a later line does not count
        assert!(!body_looks_like_error("ok\n{\"error\":{}}"));
    }

    #[test]
    fn extracts_type_and_message() {
        let body = r#"{"error":{"type":"OAuthException","message":"Session has expired"}}"#;
        let details = extract_error_details(body).unwrap();
        assert_eq!(details.kind.as_deref(), Some("OAuthException"));
        assert_eq!(details.message.as_deref(), Some("Session has expired"));
    }

    #[test]
    fn tolerates_extra_and_missing_fields() {
        let body = r#"{"error":{"message":"boom","code":190}}"#;
        let details = extract_error_details(body).unwrap();
        assert!(details.kind.is_none());
        assert_eq!(details.message.as_deref(), Some("boom"));

        let body = r#"{"error":{}}"#;
        let details = extract_error_details(body).unwrap();
        assert!(details.message.is_none());
    }

    #[test]
    fn malformed_json_yields_no_details() {
        assert!(extract_error_details("{\"error\":").is_none());
        assert!(extract_error_details("<html>Bad Gateway</html>").is_none());
    }

    #[test]
    fn missing_error_key_yields_no_details() {
        assert!(extract_error_details(r#"{"data":[]}"#).is_none());
    }
}
