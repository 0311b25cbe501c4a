//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::ErrorCode};
use thiserror::Error;

use super::validator::ValidationFailure;

/// Errors that can occur during tool dispatch.
///
/// `ExecutionFailed` is the only variant that is reported in-band as a
/// failed tool result; every other variant becomes a protocol error.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The call's arguments do not fit the tool's schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool ran but its underlying operation failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// A fault that should not happen under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code this error maps to when raised as a protocol error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::METHOD_NOT_FOUND,
            Self::InvalidArguments(_) => ErrorCode::INVALID_PARAMS,
            Self::ExecutionFailed(_) | Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }
}

impl From<ValidationFailure> for ToolError {
    fn from(failure: ValidationFailure) -> Self {
        Self::InvalidArguments(failure.to_string())
    }
}

impl From<ToolError> for McpError {
    fn from(error: ToolError) -> Self {
        McpError::new(error.code(), error.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::not_found("x").code(), ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(
            ToolError::invalid_arguments("x").code(),
            ErrorCode::INVALID_PARAMS
        );
        assert_eq!(ToolError::internal("x").code(), ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_into_mcp_error_names_tool() {
        let error: McpError = ToolError::not_found("nonexistent").into();
        assert_eq!(error.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unknown tool: nonexistent");
        assert!(error.data.is_none());
    }

    #[test]
    fn test_from_validation_failure() {
        let error = ToolError::from(ValidationFailure::NotAnObject);
        assert!(matches!(error, ToolError::InvalidArguments(_)));
        assert_eq!(
            error.to_string(),
            "Invalid arguments: Arguments must be a JSON object"
        );
    }
}
