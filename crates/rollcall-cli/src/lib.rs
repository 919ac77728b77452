//! Rollcall CLI library.
//!
//! Argument parsing, command execution and output formatting for the
//! `rollcall` binary.

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{Cli, Command};
pub use output::Formatter;
