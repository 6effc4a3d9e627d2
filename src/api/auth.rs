// =============================================================================
// Bearer Token Authentication — Axum Extractor
// =============================================================================
//
// Extracts and validates a Bearer token from the `Authorization` header.
// The expected token comes from `AppState::api_token` (read from
// `VANTAGE_API_TOKEN` at startup). Comparison is performed in constant time to
// prevent timing side-channel attacks.
//
// Usage as an Axum extractor:
//
//   async fn handler(_auth: AuthBearer, ...) { ... }
//
// If the token is missing or invalid, the extractor short-circuits the request
// with a 401 Unauthorized response before the handler body executes.
// =============================================================================

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::error::ApiError;
use crate::app_state::AppState;

// =============================================================================
// Constant-time comparison
// =============================================================================

/// Compare two byte slices in constant time. Returns `true` if they are
/// identical. The comparison always examines every byte of both slices even
/// when a mismatch is found early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        // The attacker does not control the expected token length.
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// =============================================================================
// Extractor
// =============================================================================

/// Marker extractor: its presence in a handler signature makes the route
/// require a valid `Authorization: Bearer <token>` header.
pub struct AuthBearer;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthBearer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.api_token.as_deref() else {
            warn!("VANTAGE_API_TOKEN is not set, all authenticated requests will be rejected");
            return Err(ApiError::Unauthorized("Server authentication not configured"));
        };

        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            warn!("Missing or malformed Authorization header");
            return Err(ApiError::Unauthorized("Missing or invalid authorization token"));
        };

        if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
            warn!("Invalid API token presented");
            return Err(ApiError::Unauthorized("Invalid authorization token"));
        }

        Ok(AuthBearer)
    }
}

// =============================================================================
// Tests
// =============================================================================
