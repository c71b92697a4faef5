//! Core types: host-environment context, per-command options, and errors.

pub mod context;
pub mod error;
pub mod options;
