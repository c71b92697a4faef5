//! A small command-orchestration helper.
//!
//! Define an ordered sequence of steps (console-app subcommands, external
//! commands, in-process closures, HTTP pings) and run them against an
//! [`Executor`], which executes each step in order, accumulates textual
//! output, and can fire a desktop notification when the sequence completes.
//!
//! # Quick start
//!
//! ```no_run
//! use runbook::{ExecutionContext, Executor, ExecutorError, RunOptions};
//!
//! # async fn deploy() -> Result<(), ExecutorError> {
//! let context = ExecutionContext::new(".")
//!     .with_console_command(["cargo", "xtask"])
//!     .running_in_console(true);
//!
//! let executor = Executor::new(context)
//!     .execute(|mut exec| async move {
//!         exec.run_console("migrate", RunOptions::default())
//!             .await?
//!             .run_external("echo deployed", RunOptions::default())
//!             .await?
//!             .run_closure(|| "cache warmed".to_string());
//!         exec.ping("https://example.com/health").await?;
//!         exec.notify("Deploy", "All steps completed");
//!         Ok(exec)
//!     })
//!     .await?;
//!
//! println!("{}", executor.output());
//! # Ok(())
//! # }
//! ```
//!
//! Command strings are split on whitespace only; there is no shell
//! quoting, so arguments containing spaces cannot be expressed. See
//! [`Executor::run_external`].

pub mod core;
pub mod execution;
pub mod notify;
pub mod ping;
pub mod testing;

pub use crate::core::context::ExecutionContext;
pub use crate::core::error::ExecutorError;
pub use crate::core::options::RunOptions;
pub use crate::execution::Executor;
pub use crate::notify::{DesktopNotifier, Notifier, NullNotifier};
pub use crate::ping::{HttpPinger, Pinger};
