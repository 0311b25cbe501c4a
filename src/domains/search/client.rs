//! Search client contract consumed by the `search` tool.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::UpstreamFailure;

/// Recency window accepted by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFilter {
    Month,
    Week,
    Day,
    Hour,
}

impl RecencyFilter {
    /// Wire values, in the order they are advertised to clients.
    pub const VALUES: &'static [&'static str] = &["month", "week", "day", "hour"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw query text, forwarded verbatim as the user message.
    pub query: String,

    /// Optional recency window. `None` means the field is left out of the
    /// upstream payload entirely.
    pub recency: Option<RecencyFilter>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            recency: None,
        }
    }

    pub fn with_recency(mut self, recency: Option<RecencyFilter>) -> Self {
        self.recency = recency;
        self
    }
}

/// Answer returned by the upstream provider.
///
/// Field order is part of the user-facing output: `content` is rendered
/// before `citations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAnswer {
    pub content: String,
    pub citations: Vec<String>,
}

/// A client able to answer web search queries.
///
/// Implementations make exactly one upstream call per invocation and keep no
/// state between calls.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchAnswer, UpstreamFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency_values_match_serde_names() {
        for filter in [
            RecencyFilter::Month,
            RecencyFilter::Week,
            RecencyFilter::Day,
            RecencyFilter::Hour,
        ] {
            let json = serde_json::to_value(filter).unwrap();
            assert_eq!(json, filter.as_str());
            assert!(RecencyFilter::VALUES.contains(&filter.as_str()));
        }
    }

    #[test]
    fn test_recency_rejects_unknown_value() {
        let parsed: Result<RecencyFilter, _> = serde_json::from_str(r#""year""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_answer_serializes_content_first() {
        let answer = SearchAnswer {
            content: "Paris".to_string(),
            citations: vec!["https://a".to_string()],
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert_eq!(json, r#"{"content":"Paris","citations":["https://a"]}"#);
    }
}
