//! Host-environment configuration for the executor.
//!
//! The original environment predicates ("running in a console", "running
//! under tests") are passed in explicitly rather than read from ambient
//! global state, so orchestrations behave deterministically under test.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Execution environment supplied by the host application.
///
/// Carries the application root directory (forced working directory for
/// captured commands), the console-app invocation prefix used by
/// [`run_console`](crate::Executor::run_console), and the two environment
/// predicates the engine consults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Application root; captured commands run with this working directory.
    app_root: PathBuf,
    /// Invocation prefix for console-app subcommands, e.g.
    /// `["cargo", "xtask"]`. Prepended verbatim, interpreter first.
    #[serde(default)]
    console_command: Vec<String>,
    /// Whether the host is running in an attended console.
    #[serde(default)]
    in_console: bool,
    /// Whether the host is running under automated tests.
    #[serde(default)]
    under_test: bool,
}

impl ExecutionContext {
    /// Create a context rooted at the given application directory.
    ///
    /// Defaults: no console-app prefix, not in a console, not under test.
    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            console_command: Vec::new(),
            in_console: false,
            under_test: false,
        }
    }

    /// Builder: set the console-app invocation prefix (interpreter name and
    /// subcommand-framework entry point).
    pub fn with_console_command<I, S>(mut self, prefix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.console_command = prefix.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: mark the host as running in an attended console.
    pub fn running_in_console(mut self, in_console: bool) -> Self {
        self.in_console = in_console;
        self
    }

    /// Builder: mark the host as running under automated tests.
    pub fn running_tests(mut self, under_test: bool) -> Self {
        self.under_test = under_test;
        self
    }

    /// The application root directory.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Whether the host is console-capable. Interactive commands are only
    /// legal when this holds.
    pub fn is_console(&self) -> bool {
        self.in_console
    }

    /// Whether the host is running under automated tests.
    pub fn is_under_test(&self) -> bool {
        self.under_test
    }

    /// Whether step output should be echoed to stdout as it is produced:
    /// an attended console, and not an automated test run.
    pub fn interactive_console(&self) -> bool {
        self.in_console && !self.under_test
    }

    /// Prepend the console-app invocation prefix to a subcommand string.
    ///
    /// With no prefix configured the subcommand is returned unchanged.
    pub(crate) fn console_invocation(&self, command: &str) -> String {
        if self.console_command.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", self.console_command.join(" "), command)
        }
    }
}
