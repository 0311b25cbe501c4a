//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: Raw TCP socket with line-delimited JSON-RPC - feature: `tcp`
//! - **HTTP**: HTTP server with JSON-RPC over POST requests - feature: `http`
//!
//! Every transport hands raw messages to [`McpServer::handle_line`] and
//! writes back whatever it returns. STDIO and TCP share the sequential
//! line loop in `connection`.
//!
//! [`McpServer::handle_line`]: crate::core::McpServer::handle_line

mod config;
mod connection;
mod error;
pub mod message;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use connection::serve_connection;
pub use error::{TransportError, TransportResult};
pub use message::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use service::{TransportService, run_until_shutdown};

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
