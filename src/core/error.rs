//! Executor error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while executing a chain of steps.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Interactive execution was requested outside a console context.
    ///
    /// Raised before any process spawns; the caller may retry the command
    /// non-interactively.
    #[error("Interactive commands can only be run in the console.")]
    InteractiveOutsideConsole,

    /// The command string contained no tokens after whitespace splitting.
    #[error("empty command string")]
    EmptyCommand,

    /// The child process could not be started.
    #[error("failed to start command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output or waiting on it failed.
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-interactive command exceeded its deadline and was killed.
    #[error("command '{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// An HTTP ping failed, either at the transport level or with a
    /// non-success status.
    #[error("GET {url} failed: {reason}")]
    Ping { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ExecutorError::InteractiveOutsideConsole;
        assert_eq!(
            err.to_string(),
            "Interactive commands can only be run in the console."
        );
    }

    #[test]
    fn test_timeout_error_names_command() {
        let err = ExecutorError::Timeout {
            command: "sleep 60".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert!(err.to_string().contains("sleep 60"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_ping_error_names_url() {
        let err = ExecutorError::Ping {
            url: "https://example.com/up".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GET https://example.com/up failed: connection refused"
        );
    }
}
