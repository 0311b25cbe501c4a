//! Error types for server startup and lifecycle.
//!
//! Per-request failures never surface here: the dispatcher turns them into
//! JSON-RPC errors or in-band tool results. This type covers what can stop
//! the process, i.e. bad configuration and a transport that cannot run.

use thiserror::Error;

use super::transport::TransportError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The transport failed to start or stopped unexpectedly.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("PERPLEXITY_API_KEY environment variable is required");
        assert_eq!(
            err.to_string(),
            "Configuration error: PERPLEXITY_API_KEY environment variable is required"
        );
    }

    #[test]
    fn test_transport_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reset by peer");
        let err: Error = TransportError::from(io).into();
        assert!(matches!(err, Error::Transport(TransportError::IoError(_))));
        assert!(err.to_string().contains("reset by peer"));
    }
}
