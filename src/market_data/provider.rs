// =============================================================================
// Market Data Provider — abstraction over the price-history source
// =============================================================================
//
// The analyzer only depends on this trait. The production implementation is
// `YahooChartClient`; tests plug in an in-memory provider.
// =============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::{PriceSeries, SeriesError};
use crate::types::Interval;

/// Fallback text when the provider has no business summary.
pub const SUMMARY_UNAVAILABLE: &str = "Not available.";

/// Parameters of a single history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: String,
    pub interval: Interval,
    /// Provider range code, e.g. "2y".
    pub range: String,
}

impl HistoryRequest {
    /// Build a request using the default look-back for `interval`.
    pub fn new(ticker: impl Into<String>, interval: Interval) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            range: interval.lookback_range().to_string(),
        }
    }
}

/// Descriptive metadata about the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub summary: String,
}

impl CompanyProfile {
    /// Build a profile, falling back to the ticker for a missing name.
    pub fn new(ticker: &str, name: Option<String>, summary: Option<String>) -> Self {
        Self {
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ticker.to_string()),
            summary: summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string()),
        }
    }
}

/// Everything the analyzer needs for one instrument.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub series: PriceSeries,
    pub company: CompanyProfile,
}

/// Errors that can occur within a [`MarketDataProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The provider answered with an explicit error object.
    #[error("provider error: {0}")]
    Api(String),

    #[error("no data returned for {ticker}")]
    Empty { ticker: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Source of OHLCV history plus company metadata.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the price history for `req`. An empty series must be reported as
    /// [`ProviderError::Empty`], never as an empty snapshot.
    async fn fetch_history(&self, req: &HistoryRequest) -> Result<MarketSnapshot, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_falls_back_to_ticker() {
        let p = CompanyProfile::new("MSFT", None, Some("  ".into()));
        assert_eq!(p.name, "MSFT");
        assert_eq!(p.summary, SUMMARY_UNAVAILABLE);

        let p = CompanyProfile::new("MSFT", Some("Microsoft Corporation".into()), None);
        assert_eq!(p.name, "Microsoft Corporation");
    }

    #[test]
    fn request_uses_interval_lookback() {
        let req = HistoryRequest::new("AAPL", Interval::Hour);
        assert_eq!(req.range, "730d");
        assert_eq!(req.interval, Interval::Hour);
    }
}
