//! The case record store server.
//!
//! Wires the SQLite layer into the axum router and runs it until ctrl-c.

pub mod api;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::db::{DbHandle, DocketDb};
use api::{AppState, SharedState};

/// Configuration for the record store server.
pub struct ServerConfig {
    pub port: u16,
    pub db_path: std::path::PathBuf,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8420,
            db_path: std::path::PathBuf::from(".docket/docket.db"),
            dev_mode: false,
        }
    }
}

pub fn build_router(state: SharedState) -> Router {
    api::api_router().with_state(state)
}

/// Start the record store server. Blocks until ctrl-c.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let db = DocketDb::new(&config.db_path).context("Failed to initialize docket database")?;
    let state = Arc::new(AppState {
        db: DbHandle::new(db),
    });

    let mut app = build_router(state);

    // Dev mode opens CORS so a browser front end on another port can talk
    // to the store directly.
    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let host = if config.dev_mode { "0.0.0.0" } else { "127.0.0.1" };
    let addr = format!("{}:{}", host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "docket record store listening");
    println!("Docket record store running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    println!("\nShutting down...");
}
