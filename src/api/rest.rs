// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. Health is public; every other endpoint
// requires a valid Bearer token checked via the `AuthBearer` extractor.
//
// A batch submission answers 303 See Other pointing at the first page of the
// cached result session; pages are then fetched one report at a time.
//
// CORS is configured permissively; tighten `allow_origin` in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

use super::auth::AuthBearer;
use super::error::ApiError;
use crate::analysis::{self, AnalysisReport};
use crate::app_state::AppState;
use crate::cache::{CacheError, CachedPage};
use crate::types::Interval;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Public ──────────────────────────────────────────────────
        .route("/api/v1/health", get(health))
        // ── Authenticated ───────────────────────────────────────────
        .route("/api/v1/analyze", get(analyze))
        .route("/api/v1/batch", post(submit_batch))
        .route("/api/v1/batch/:id", get(batch_page))
        // ── Middleware & State ───────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

fn resolve_interval(raw: Option<&str>, default: Interval) -> Result<Interval, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(code) => Interval::parse(code).ok_or_else(|| ApiError::UnsupportedInterval(code.to_string())),
    }
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    server_time: i64,
    uptime_secs: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        message: "service is up",
        server_time: chrono::Utc::now().timestamp_millis(),
        uptime_secs: state.uptime_secs(),
    })
}

// =============================================================================
// Single analysis (authenticated)
// =============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    ticker: Option<String>,
    interval: Option<String>,
}

async fn analyze(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let ticker = params
        .ticker
        .as_deref()
        .map(analysis::normalize_ticker)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingTicker)?;
    let interval = resolve_interval(params.interval.as_deref(), state.config.default_interval)?;

    let report = analysis::analyze_ticker(state.provider.as_ref(), &state.analyzer, &ticker, interval).await?;
    Ok(Json(report))
}

// =============================================================================
// Batch analysis (authenticated)
// =============================================================================

#[derive(Debug, Deserialize)]
struct BatchRequest {
    #[serde(default)]
    tickers: Vec<String>,
    interval: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchCreated {
    id: Uuid,
    total: usize,
}

async fn submit_batch(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.tickers.iter().all(|t| t.trim().is_empty()) {
        return Err(ApiError::EmptyBatch);
    }
    let interval = resolve_interval(req.interval.as_deref(), state.config.default_interval)?;

    let reports = state.batch_runner.analyze_many(&req.tickers, interval).await?;
    let total = reports.len();
    let id = state.cache.store(reports);

    info!(%id, total, requested = req.tickers.len(), %interval, "batch session created");

    let location = format!("/api/v1/batch/{id}?page=0");
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location)],
        Json(BatchCreated { id, total }),
    ))
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default)]
    page: i64,
}

async fn batch_page(
    _auth: AuthBearer,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<CachedPage>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| CacheError::NotFound)?;
    let page = state.cache.fetch(id, params.page)?;
    Ok(Json(page))
}

// =============================================================================
// Tests
// =============================================================================
