// =============================================================================
// API Errors — every failure a handler can return, mapped to an HTTP status
// =============================================================================
//
// Body is always `{ "error": "<message>" }`.
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::analysis::AnalysisError;
use crate::batch::BatchError;
use crate::cache::CacheError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ticker is required")]
    MissingTicker,

    #[error("unsupported interval '{0}', expected one of 1h, 1d, 1wk, 1mo")]
    UnsupportedInterval(String),

    #[error("ticker list is empty")]
    EmptyBatch,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Unauthorized(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTicker | Self::UnsupportedInterval(_) | Self::EmptyBatch => StatusCode::BAD_REQUEST,
            Self::Analysis(AnalysisError::FetchFailure { .. }) => StatusCode::NOT_FOUND,
            Self::Analysis(AnalysisError::InsufficientHistory { .. }) => StatusCode::BAD_REQUEST,
            Self::Analysis(AnalysisError::Indicator(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Batch(BatchError::NoResults) => StatusCode::NOT_FOUND,
            Self::Cache(CacheError::NotFound) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
