pub mod analyzer;
pub mod error;
pub mod indicator;
pub mod report;

pub use analyzer::{Analyzer, CHART_WINDOW};
pub use error::AnalysisError;
pub use report::AnalysisReport;

use tracing::{info, instrument, warn};

use crate::market_data::{HistoryRequest, MarketDataProvider};
use crate::types::Interval;

/// Canonical form of a user-supplied ticker.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Fetch history for `ticker` and analyze it.
///
/// Any provider failure, including a timeout, surfaces as
/// [`AnalysisError::FetchFailure`].
#[instrument(skip_all, fields(ticker = %ticker, interval = %interval))]
pub async fn analyze_ticker(
    provider: &dyn MarketDataProvider,
    analyzer: &Analyzer,
    ticker: &str,
    interval: Interval,
) -> Result<AnalysisReport, AnalysisError> {
    let ticker = normalize_ticker(ticker);
    let request = HistoryRequest::new(ticker.clone(), interval);

    let snapshot = match provider.fetch_history(&request).await {
        Ok(s) => s,
        Err(source) => {
            warn!(error = %source, "market data fetch failed");
            return Err(AnalysisError::FetchFailure { ticker, source });
        }
    };

    let report = analyzer.analyze(&ticker, interval, &snapshot)?;
    info!(
        decision = %report.summary.decision,
        up = report.summary.up_votes,
        down = report.summary.down_votes,
        "ticker analyzed"
    );
    Ok(report)
}
