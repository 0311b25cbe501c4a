//! Perplexity chat-completions client.
//!
//! Each search is a single POST to the chat-completions endpoint with a
//! two-message conversation: a system message priming the model to search
//! the web, and the user's raw query. There are no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{RecencyFilter, SearchAnswer, SearchClient, SearchQuery, UpstreamFailure};
use crate::core::config::PerplexityConfig;
use crate::core::{Error, Result};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that searches the web.";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    search_recency_filter: Option<RecencyFilter>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    context: Option<MessageContext>,
}

#[derive(Debug, Deserialize)]
struct MessageContext {
    #[serde(default)]
    citations: Vec<String>,
}

// ============================================================================
// Client
// ============================================================================

/// [`SearchClient`] backed by the Perplexity API.
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    http: reqwest::Client,
    config: PerplexityConfig,
}

impl PerplexityClient {
    /// Build a client from configuration.
    pub fn new(config: PerplexityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn parse_answer(response: ChatCompletionsResponse) -> std::result::Result<SearchAnswer, UpstreamFailure> {
        let top_level_citations = response.citations;
        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| UpstreamFailure::new("Invalid response from Perplexity: no choices returned"))?;

        let content = message.content.ok_or_else(|| {
            UpstreamFailure::new("Invalid response from Perplexity: missing message content")
        })?;

        let citations = top_level_citations
            .or_else(|| message.context.map(|context| context.citations))
            .unwrap_or_default();

        Ok(SearchAnswer { content, citations })
    }
}

#[async_trait]
impl SearchClient for PerplexityClient {
    #[instrument(skip_all, fields(recency = ?query.recency))]
    async fn search(&self, query: &SearchQuery) -> std::result::Result<SearchAnswer, UpstreamFailure> {
        let body = ChatCompletionsRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &query.query,
                },
            ],
            search_recency_filter: query.recency,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Perplexity response: status={}, {} bytes", status, text.len());

        if !status.is_success() {
            let payload = serde_json::from_str(&text).ok();
            warn!("Perplexity returned {}", status);
            return Err(UpstreamFailure::with_payload(
                format!("Request failed with status code {}", status.as_u16()),
                payload,
            ));
        }

        let parsed: ChatCompletionsResponse = serde_json::from_str(&text).map_err(|e| {
            UpstreamFailure::with_payload(
                format!("Invalid response from Perplexity: {e}"),
                serde_json::from_str(&text).ok(),
            )
        })?;

        Self::parse_answer(parsed)
    }
}
