//! Rollcall Server
//!
//! HTTP front end for natural-language attendance marking. Commands are
//! parsed by a [`CommandParser`] and recorded in an in-memory ledger that
//! backs the date, student, summary and percentage reports.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod ledger;

use config::ServerConfig;
use handlers::{create_router, AppState};
use rollcall_domain::traits::CommandParser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the attendance HTTP server
///
/// Serves until the listener fails. Tracing must already be initialised by
/// the caller.
pub async fn start_server(
    config: ServerConfig,
    parser: Arc<dyn CommandParser>,
) -> Result<(), ServerError> {
    let mode = if parser.is_remote() { "remote" } else { "fallback" };

    info!("Starting Rollcall server");
    info!("Bind address: {}", config.bind_addr());
    info!("Parser mode: {}", mode);

    let app = create_router(AppState::new(parser));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
