//! Command execution.

use crate::cli::{ParseArgs, ServeArgs};
use crate::output::Formatter;
use anyhow::{Context, Result};
use rollcall_parser::{AttendanceParser, ParserConfig};
use rollcall_server::config::ServerConfig;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load the server configuration, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

/// Override the bind address and port with an `addr:port` string.
pub fn apply_bind(mut config: ServerConfig, bind: Option<&str>) -> Result<ServerConfig> {
    if let Some(bind) = bind {
        let addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind))?;
        config.bind_address = addr.ip().to_string();
        config.bind_port = addr.port();
    }
    Ok(config)
}

fn build_parser(config: ParserConfig, fallback_only: bool) -> AttendanceParser<rollcall_llm::GroqProvider> {
    if fallback_only {
        AttendanceParser::fallback_only(config)
    } else {
        AttendanceParser::from_env(config)
    }
}

/// Parse one sentence and print the structured command.
pub async fn execute_parse(args: ParseArgs, formatter: &Formatter) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let parser = build_parser(config.parser, args.fallback_only);

    if !parser.is_remote() && !args.fallback_only {
        eprintln!("{}", formatter.warning("Completion service not configured; using rule-based parser"));
    }

    let parsed = parser.parse(&args.sentence).await;
    debug!(students = parsed.students.len(), "Parsed sentence");

    let output = formatter
        .parsed_command(&parsed)
        .context("Failed to format parsed command")?;
    println!("{}", output);
    Ok(())
}

/// Start the HTTP server and run until it stops.
pub async fn execute_serve(args: ServeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let config = apply_bind(config, args.bind.as_deref())?;
    let parser = AttendanceParser::from_env(config.parser.clone());

    rollcall_server::start_server(config, Arc::new(parser))
        .await
        .context("Server stopped with an error")
}
