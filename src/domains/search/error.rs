//! Upstream failure type.

use serde_json::Value;
use thiserror::Error;

/// A failed upstream call: network error, non-2xx status or a response body
/// that could not be understood.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UpstreamFailure {
    /// Message describing the failure itself (transport or status level).
    pub message: String,

    /// Response body returned by the provider, when there was one and it
    /// parsed as JSON.
    pub payload: Option<Value>,
}

impl UpstreamFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(message: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }

    /// Human-readable diagnostic for the end user.
    ///
    /// Prefers the provider's own `error.message` from the payload and falls
    /// back to the failure message.
    pub fn diagnostic(&self) -> String {
        self.payload
            .as_ref()
            .and_then(|payload| payload.get("error"))
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.message.clone())
    }
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new("Request timed out")
        } else if e.is_connect() {
            Self::new(format!("Connection failed: {e}"))
        } else {
            Self::new(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_prefers_embedded_message() {
        let failure = UpstreamFailure::with_payload(
            "Request failed with status code 429",
            Some(json!({ "error": { "message": "rate limited", "type": "rate_limit" } })),
        );
        assert_eq!(failure.diagnostic(), "rate limited");
    }

    #[test]
    fn test_diagnostic_falls_back_to_message() {
        let failure = UpstreamFailure::with_payload(
            "Request failed with status code 502",
            Some(json!({ "detail": "bad gateway" })),
        );
        assert_eq!(failure.diagnostic(), "Request failed with status code 502");

        let failure = UpstreamFailure::new("Connection failed");
        assert_eq!(failure.diagnostic(), "Connection failed");
    }

    #[test]
    fn test_diagnostic_ignores_non_string_message() {
        let failure =
            UpstreamFailure::with_payload("boom", Some(json!({ "error": { "message": 42 } })));
        assert_eq!(failure.diagnostic(), "boom");
    }
}
