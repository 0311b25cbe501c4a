//! Tool dispatcher - resolves, validates, invokes and normalizes tool calls.
//!
//! Request-level problems (unknown tool, bad arguments) are returned as
//! protocol errors so the host can react programmatically. Failures of the
//! tool's own work are returned as a normal `CallToolResult` with
//! `isError: true`, so the host's conversation can show them to the user.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, Tool},
};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validator::{arguments_object, validate};

/// Dispatches `tools/list` and `tools/call` against a [`ToolRegistry`].
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// All tools, in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|d| d.to_tool())
            .collect()
    }

    /// Run one tool call to completion.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult, McpError> {
        let Some(handler) = self.registry.handler(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name).into());
        };

        let arguments = arguments_object(arguments)
            .and_then(|args| validate(handler.descriptor(), &args).map(|()| args))
            .map_err(|failure| {
                warn!("Rejected arguments for '{}': {}", name, failure);
                McpError::from(ToolError::from(failure))
            })?;

        info!("Calling tool '{}'", name);

        match AssertUnwindSafe(handler.call(arguments)).catch_unwind().await {
            Ok(Ok(payload)) => Self::success(&payload),
            Ok(Err(ToolError::ExecutionFailed(message))) => {
                error!("Tool '{}' failed: {}", name, message);
                Ok(CallToolResult::error(vec![Content::text(message)]))
            }
            Ok(Err(other)) => {
                warn!("Tool '{}' rejected the call: {}", name, other);
                Err(other.into())
            }
            Err(_) => {
                error!("Tool '{}' panicked", name);
                Err(McpError::internal_error(
                    format!("Tool '{name}' failed unexpectedly"),
                    None,
                ))
            }
        }
    }

    /// Wrap a handler payload into a single pretty-printed text block.
    fn success(payload: &Value) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(payload)
            .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {e}"), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
