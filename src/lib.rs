//! Perplexity search MCP server.
//!
//! A Model Context Protocol server exposing a single `search` tool that
//! answers queries through the Perplexity chat-completions API and returns
//! the answer text together with its source citations.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the JSON-RPC server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registry, argument validation and dispatch
//!   - **search**: the upstream search client
//!
//! # Example
//!
//! ```rust,no_run
//! use perplexity_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
