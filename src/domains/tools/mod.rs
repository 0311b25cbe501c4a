//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `descriptor.rs` - Static tool metadata and argument schemas
//! - `validator.rs` - Structural argument validation
//! - `handlers.rs` - The `ToolHandler` trait every tool implements
//! - `registry.rs` - Ordered tool registry
//! - `dispatcher.rs` - Resolve, validate, invoke, normalize
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `build_registry()` in `registry.rs`

pub mod definitions;
pub mod descriptor;
mod dispatcher;
mod error;
mod handlers;
mod registry;
pub mod validator;

pub use descriptor::{InputSchema, ParamSpec, ParamType, ToolDescriptor};
pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use handlers::ToolHandler;
pub use registry::{ToolRegistry, build_registry};
pub use validator::{ValidationFailure, validate};
