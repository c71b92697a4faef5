//! The chainable execution engine.
//!
//! An [`Executor`] runs an ordered sequence of steps, appending each step's
//! textual result to an output buffer. Every chainable operation hands the
//! same executor back, so a whole orchestration reads as one fluent chain.
//! Orchestrations are plain async functions that receive the engine, run
//! their steps, and return it. See [`Executor::execute`].

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use tracing::debug;

use crate::core::context::ExecutionContext;
use crate::core::error::ExecutorError;
use crate::core::options::RunOptions;
use crate::notify::{DesktopNotifier, Notifier};
use crate::ping::{HttpPinger, Pinger};

use super::command;

/// Executes an ordered sequence of steps, accumulating their output.
///
/// Steps run strictly one after another; a step only begins once the
/// previous one has completed. The output buffer holds the concatenation,
/// in call order, of every executed step's textual result since
/// construction (or since the reset performed by [`execute`]).
///
/// Failure semantics differ by step kind and are part of the contract:
/// a captured command that exits non-zero is NOT an error; its stderr text
/// lands in the buffer instead of its stdout; an interactive command's
/// outcome is only a marker string in the buffer; validation, ping, and
/// spawn failures abort the chain with an [`ExecutorError`] and leave the
/// buffer untouched; panics inside closures propagate to the caller.
///
/// [`execute`]: Executor::execute
pub struct Executor {
    context: ExecutionContext,
    output: String,
    notifier: Box<dyn Notifier>,
    pinger: Box<dyn Pinger>,
}

impl Executor {
    /// Create an executor with the production collaborators: a desktop
    /// notifier and an HTTP pinger with its own client.
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            context,
            output: String::new(),
            notifier: Box::new(DesktopNotifier::new()),
            pinger: Box::new(HttpPinger::new()),
        }
    }

    /// Builder: replace the notification collaborator.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Builder: replace the HTTP ping collaborator.
    pub fn with_pinger(mut self, pinger: impl Pinger + 'static) -> Self {
        self.pinger = Box::new(pinger);
        self
    }

    /// The host-environment context this executor was built with.
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// The accumulated output of every step run so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Run a console-app subcommand.
    ///
    /// The command is prefixed with the context's console-app invocation
    /// (e.g. `cargo xtask`) and then executed like
    /// [`run_external`](Self::run_external), with the same validation,
    /// splitting, and output rules.
    pub async fn run_console(
        &mut self,
        command: &str,
        options: RunOptions,
    ) -> Result<&mut Self, ExecutorError> {
        let invocation = self.context.console_invocation(command);
        self.run_command(&invocation, options).await
    }

    /// Run an external command verbatim.
    ///
    /// In captured mode the string is split on whitespace into argv; there
    /// is no shell quoting, so arguments containing spaces cannot be
    /// expressed. A non-zero exit appends the command's stderr instead of
    /// its stdout and raises no error. Interactive mode requires a console
    /// context and appends a fixed outcome marker.
    pub async fn run_external(
        &mut self,
        command: &str,
        options: RunOptions,
    ) -> Result<&mut Self, ExecutorError> {
        self.run_command(command, options).await
    }

    async fn run_command(
        &mut self,
        command: &str,
        options: RunOptions,
    ) -> Result<&mut Self, ExecutorError> {
        self.validate(options.interactive)?;

        let appended = if options.interactive {
            command::run_interactive(command).await?.to_string()
        } else {
            command::run_captured(command, &self.context, options.timeout).await?
        };
        self.output.push_str(&appended);
        Ok(self)
    }

    /// Interactive execution is only legal in a console-capable context.
    fn validate(&self, interactive: bool) -> Result<(), ExecutorError> {
        if interactive && !self.context.is_console() {
            return Err(ExecutorError::InteractiveOutsideConsole);
        }
        Ok(())
    }

    /// Run an in-process step.
    ///
    /// The closure's return value is appended to the buffer regardless of
    /// context; it is additionally echoed to stdout when the host is an
    /// attended console outside automated tests. Panics inside the closure
    /// propagate to the caller unchanged.
    pub fn run_closure<F>(&mut self, step: F) -> &mut Self
    where
        F: FnOnce() -> String,
    {
        let result = step();
        if self.context.interactive_console() {
            print!("{result}");
            let _ = std::io::stdout().flush();
        }
        self.output.push_str(&result);
        self
    }

    /// Issue a GET to the given URL with no extra headers.
    ///
    /// See [`ping_with_headers`](Self::ping_with_headers).
    pub async fn ping(&mut self, url: &str) -> Result<&mut Self, ExecutorError> {
        self.ping_with_headers(url, &HashMap::new()).await
    }

    /// Issue a GET to the given URL with the given headers.
    ///
    /// The response body is discarded and the output buffer is never
    /// touched; transport failures and non-success statuses abort the chain
    /// with [`ExecutorError::Ping`].
    pub async fn ping_with_headers(
        &mut self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<&mut Self, ExecutorError> {
        debug!(url, "pinging");
        self.pinger.get(url, headers).await?;
        Ok(self)
    }

    /// Fire a desktop notification and chain on.
    ///
    /// Fire-and-forget: display failures are logged by the notifier, never
    /// surfaced here, and the output buffer is not touched.
    pub fn notify(&mut self, title: &str, body: &str) -> &mut Self {
        self.notifier.notify(title, body);
        self
    }

    /// Reset the buffer and hand the engine to an orchestration function.
    ///
    /// The function receives the executor, runs its ordered steps, and
    /// returns it for output inspection:
    ///
    /// ```no_run
    /// use runbook::{ExecutionContext, Executor, ExecutorError, RunOptions};
    ///
    /// # async fn demo() -> Result<(), ExecutorError> {
    /// let executor = Executor::new(ExecutionContext::new("."))
    ///     .execute(|mut exec| async move {
    ///         exec.run_external("echo deployed", RunOptions::default())
    ///             .await?;
    ///         Ok(exec)
    ///     })
    ///     .await?;
    /// assert_eq!(executor.output(), "deployed\n");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute<F, Fut>(mut self, steps: F) -> Result<Self, ExecutorError>
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = Result<Self, ExecutorError>>,
    {
        self.reset_output();
        steps(self).await
    }

    fn reset_output(&mut self) {
        self.output.clear();
    }
}
