//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rollcall - Mark attendance from plain-English sentences.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one attendance sentence and print the result
    Parse(ParseArgs),

    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Sentence such as "John and Mary are late on 6 Feb 2026"
    pub sentence: String,

    /// Skip the completion service even when a key is configured
    #[arg(long)]
    pub fallback_only: bool,

    /// Print the parsed command as JSON
    #[arg(long)]
    pub json: bool,

    /// Parser configuration file (the [parser] table of a server config)
    #[arg(short, long, env = "ROLLCALL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Server configuration file
    #[arg(short, long, env = "ROLLCALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the bind address (e.g., 0.0.0.0:8000)
    #[arg(short, long)]
    pub bind: Option<String>,
}
