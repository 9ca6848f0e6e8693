//! Error types for the lldb-debug MCP server

use thiserror::Error;

/// Main error type for the lldb-debug MCP server
///
/// Structural failures only. Errors LLDB itself reports (bad breakpoint
/// location, unknown variable, compile errors in an expression) are not
/// errors at this layer — they come back as plain response text.
#[derive(Error, Debug)]
pub enum DebugError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("LLDB not found: {0}")]
    LldbNotFound(String),

    #[error("Failed to spawn debugger: {0}")]
    SpawnFailed(String),

    #[error("Debugger process not started")]
    ProcessNotStarted,

    #[error("Write to debugger failed: {0}")]
    WriteFailed(String),

    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DebugError {
    /// True when the caller's request was bad (surface as invalid_params),
    /// false when the process/pipe layer failed (surface as internal_error).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DebugError::InvalidInput(_) | DebugError::SessionNotFound(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DebugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DebugError::SessionNotFound("abc123".to_string());
        assert!(err.to_string().contains("abc123"));

        let err = DebugError::SpawnFailed("no such file".to_string());
        assert!(err.to_string().contains("no such file"));

        let err = DebugError::ProcessNotStarted;
        assert_eq!(err.to_string(), "Debugger process not started");
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(DebugError::InvalidInput("missing field".to_string()).is_invalid_input());
        assert!(DebugError::SessionNotFound("x".to_string()).is_invalid_input());
        assert!(!DebugError::ProcessNotStarted.is_invalid_input());
        assert!(!DebugError::SpawnFailed("x".to_string()).is_invalid_input());
        assert!(!DebugError::BuildFailed("x".to_string()).is_invalid_input());
    }
}
