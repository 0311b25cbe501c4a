//! Tool handler seam.
//!
//! Every tool is a [`ToolHandler`]: a static descriptor plus an async
//! `call`. The dispatcher owns validation and result shaping, so handlers
//! only ever see arguments that already passed their own schema.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// Trait for implementing tool handlers.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Static metadata for this tool.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Get the name of this tool.
    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Execute the tool with validated arguments.
    ///
    /// On success returns the structured payload that the dispatcher renders
    /// into the text block. Upstream problems are reported as
    /// [`ToolError::ExecutionFailed`].
    async fn call(&self, arguments: JsonObject) -> Result<Value, ToolError>;
}
