//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry is filled once at startup and is read-only afterwards. Tools
//! are kept in registration order so that `tools/list` is stable across
//! calls.

use std::sync::Arc;
use tracing::warn;

use super::definitions::SearchTool;
use super::descriptor::ToolDescriptor;
use super::handlers::ToolHandler;
use crate::domains::search::SearchClient;

// ============================================================================
// Tool Registry
// ============================================================================

/// Ordered set of tool handlers, keyed by tool name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Names are unique: if a tool with the same name is already registered
    /// the new one is ignored.
    pub fn with_tool(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        if self.handler(handler.name()).is_some() {
            warn!("Tool '{}' is already registered, ignoring duplicate", handler.name());
            return self;
        }
        self.tools.push(handler);
        self
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Descriptors of all tools, in registration order.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// Look up a tool's descriptor by name.
    pub fn describe(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| t.descriptor())
            .find(|d| d.name == name)
    }

    /// Look up a tool's handler by name.
    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Build the registry with every tool this server exposes.
pub fn build_registry(search_client: Arc<dyn SearchClient>) -> ToolRegistry {
    ToolRegistry::new().with_tool(Arc::new(SearchTool::new(search_client)))
}
