//! Rollcall CLI - parse attendance sentences or run the attendance server.

use clap::Parser;
use rollcall_cli::commands;
use rollcall_cli::{Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Parse(args) => {
            let formatter = Formatter::new(args.json, !cli.no_color);
            commands::execute_parse(args, &formatter).await
        }
        Command::Serve(args) => commands::execute_serve(args).await,
    }
}
