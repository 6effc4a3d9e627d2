// =============================================================================
// Vantage Advisor — Main Entry Point
// =============================================================================
//
// Serves technical-analysis recommendations over HTTP. Every request fetches
// fresh history from the market-data provider; only batch result sessions are
// kept in memory.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod batch;
mod cache;
mod indicators;
mod market_data;
mod runtime_config;
mod signals;
mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::{AppState, API_TOKEN_ENV};
use crate::market_data::YahooChartClient;
use crate::runtime_config::{RuntimeConfig, CONFIG_FILE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Vantage Advisor — Starting Up                    ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = RuntimeConfig::load(CONFIG_FILE).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    let api_token = std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty());
    if api_token.is_none() {
        warn!(env = API_TOKEN_ENV, "API token is not set, authenticated endpoints will answer 401");
    }

    info!(
        provider = %config.provider_base_url,
        default_interval = %config.default_interval,
        batch_concurrency = config.batch_concurrency,
        fetch_timeout_secs = config.fetch_timeout_secs,
        "Configuration resolved"
    );

    // ── 2. Market-data provider ──────────────────────────────────────────
    let provider = Arc::new(YahooChartClient::new(
        &config.provider_base_url,
        Duration::from_secs(config.fetch_timeout_secs),
    )?);

    // ── 3. Build shared state ────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, provider, api_token));

    // ── 4. Start the API server ──────────────────────────────────────────
    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening. Press Ctrl+C to stop.");

    // ── 5. Graceful shutdown ─────────────────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Vantage Advisor shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
