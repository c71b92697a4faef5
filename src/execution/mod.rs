//! The execution engine.
//!
//! [`Executor`] runs ordered sequences of steps (console-app subcommands,
//! external commands, in-process closures, and HTTP pings), appending each
//! step's textual result to a shared output buffer.

mod command;
mod executor;

pub use executor::Executor;
