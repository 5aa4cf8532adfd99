mod auth;
mod config;
mod editor;
mod errors;
mod models;
mod remote;
mod render;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::session::{run_idle_sweep, SessionStore};
use crate::remote::{build_http_client, HttpResumeAnalyzer, HttpResumeStore, HttpTextEnhancer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; missing required env vars abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by every backend collaborator
    let http = build_http_client(config.request_timeout)
        .context("Failed to build HTTP client for the resume backend")?;
    info!(
        "Resume backend at {} (timeout {}s)",
        config.backend_api_url,
        config.request_timeout.as_secs()
    );

    let sessions = Arc::new(SessionStore::default());
    tokio::spawn(run_idle_sweep(sessions.clone(), config.session_idle_timeout));

    let state = AppState {
        sessions,
        enhancer: Arc::new(HttpTextEnhancer::new(
            http.clone(),
            config.backend_api_url.clone(),
        )),
        resumes: Arc::new(HttpResumeStore::new(
            http.clone(),
            config.backend_api_url.clone(),
        )),
        analyzer: Arc::new(HttpResumeAnalyzer::new(http, config.backend_api_url.clone())),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
