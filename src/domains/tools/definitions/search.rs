//! Web search tool backed by the upstream search client.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::domains::search::{RecencyFilter, SearchClient, SearchQuery};
use crate::domains::tools::descriptor::{InputSchema, ParamSpec, ToolDescriptor};
use crate::domains::tools::{ToolError, ToolHandler};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// The search query.
    pub query: String,

    /// Optional recency window.
    #[serde(default)]
    pub search_recency_filter: Option<RecencyFilter>,
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        SearchQuery::new(params.query).with_recency(params.search_recency_filter)
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Search Tool implementation.
pub struct SearchTool {
    client: Arc<dyn SearchClient>,
    descriptor: ToolDescriptor,
}

impl SearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the web using Perplexity API";

    /// Prefix of the in-band message returned when the upstream call fails.
    pub const FAILURE_PREFIX: &'static str = "Error searching with Perplexity";

    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            descriptor: Self::build_descriptor(),
        }
    }

    /// Descriptor advertised in `tools/list`.
    pub fn build_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            InputSchema::object()
                .required(ParamSpec::string("query", "The search query"))
                .optional(
                    ParamSpec::string(
                        "search_recency_filter",
                        "Filter search results by recency (options: month, week, day, hour)",
                    )
                    .with_allowed_values(RecencyFilter::VALUES),
                ),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for SearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    #[instrument(skip_all, fields(tool = "search"))]
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        let params: SearchParams = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let query = SearchQuery::from(params);
        info!("Searching: {:?} (recency: {:?})", query.query, query.recency);

        let answer = self.client.search(&query).await.map_err(|failure| {
            let detail = failure
                .payload
                .as_ref()
                .map(|payload| payload.to_string())
                .unwrap_or_else(|| failure.message.clone());
            error!("Perplexity API error: {}", detail);
            ToolError::execution_failed(format!(
                "{}: {}",
                Self::FAILURE_PREFIX,
                failure.diagnostic()
            ))
        })?;

        info!("Search returned {} citation(s)", answer.citations.len());

        serde_json::to_value(&answer).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::search::UpstreamFailure;
    use crate::domains::search::testing::StubSearchClient;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_params_default_recency() {
        let params: SearchParams = serde_json::from_str(r#"{"query": "rust"}"#).unwrap();
        assert_eq!(params.query, "rust");
        assert!(params.search_recency_filter.is_none());
    }

    #[test]
    fn test_params_null_recency() {
        let params: SearchParams =
            serde_json::from_str(r#"{"query": "rust", "search_recency_filter": null}"#).unwrap();
        assert!(params.search_recency_filter.is_none());
    }

    #[test]
    fn test_descriptor_schema() {
        let descriptor = SearchTool::build_descriptor();
        let schema = Value::Object(descriptor.input_schema.to_json_object());
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(
            schema["properties"]["search_recency_filter"]["enum"],
            json!(["month", "week", "day", "hour"])
        );
        assert_eq!(schema["properties"]["query"]["type"], "string");
    }

    #[tokio::test]
    async fn test_call_forwards_query_and_recency() {
        let client = Arc::new(StubSearchClient::answering("answer", &[]));
        let tool = SearchTool::new(client.clone());

        tool.call(object(json!({ "query": "news", "search_recency_filter": "hour" })))
            .await
            .unwrap();

        assert_eq!(
            client.calls(),
            vec![SearchQuery::new("news").with_recency(Some(RecencyFilter::Hour))]
        );
    }

    #[tokio::test]
    async fn test_call_returns_structured_answer() {
        let client = Arc::new(StubSearchClient::answering("Paris", &["https://a"]));
        let tool = SearchTool::new(client);

        let payload = tool.call(object(json!({ "query": "q" }))).await.unwrap();
        assert_eq!(payload, json!({ "content": "Paris", "citations": ["https://a"] }));
    }

    #[tokio::test]
    async fn test_call_failure_is_execution_failed() {
        let client = Arc::new(StubSearchClient::failing(UpstreamFailure::new(
            "Connection failed",
        )));
        let tool = SearchTool::new(client);

        let err = tool.call(object(json!({ "query": "q" }))).await.unwrap_err();
        match err {
            ToolError::ExecutionFailed(message) => {
                assert_eq!(message, "Error searching with Perplexity: Connection failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_failure_with_payload_uses_provider_message() {
        let client = Arc::new(StubSearchClient::failing(UpstreamFailure::with_payload(
            "Request failed with status code 401",
            Some(json!({ "error": { "message": "invalid api key" } })),
        )));
        let tool = SearchTool::new(client);

        let err = tool.call(object(json!({ "query": "q" }))).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error searching with Perplexity: invalid api key"
        );
    }

    #[tokio::test]
    async fn test_call_rejects_undecodable_arguments() {
        let client = Arc::new(StubSearchClient::echo());
        let tool = SearchTool::new(client.clone());

        let err = tool.call(object(json!({}))).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert_eq!(client.call_count(), 0);
    }
}
