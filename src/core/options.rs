//! Per-command execution settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for a single console or external command step.
///
/// The defaults mirror the engine's contract: non-interactive execution with
/// a 60 second deadline.
///
/// # Example
///
/// ```
/// use runbook::RunOptions;
/// use std::time::Duration;
///
/// let quick = RunOptions::default().with_timeout(Duration::from_secs(5));
/// let attended = RunOptions::interactive();
/// let unbounded = RunOptions::default().without_timeout();
/// # assert!(!quick.interactive);
/// # assert!(attended.interactive);
/// # assert!(unbounded.timeout.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Run with direct terminal pass-through instead of capturing output.
    /// Only legal in a console context.
    pub interactive: bool,
    /// Deadline for captured execution; `None` disables the deadline.
    /// Ignored by interactive commands.
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            interactive: false,
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl RunOptions {
    /// Options for an interactive (terminal pass-through) command.
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Self::default()
        }
    }

    /// Builder: set the execution deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder: remove the execution deadline entirely.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_captured_with_sixty_second_deadline() {
        let opts = RunOptions::default();

        assert!(!opts.interactive);
        assert_eq!(opts.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_interactive_keeps_default_timeout() {
        let opts = RunOptions::interactive();

        assert!(opts.interactive);
        assert_eq!(opts.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_timeout_builders() {
        let opts = RunOptions::default().with_timeout(Duration::from_millis(250));
        assert_eq!(opts.timeout, Some(Duration::from_millis(250)));

        let opts = opts.without_timeout();
        assert_eq!(opts.timeout, None);
    }
}
