// =============================================================================
// Batch Runner — analyze many tickers concurrently and rank the survivors
// =============================================================================
//
// Tickers fan out as a bounded stream (`buffer_unordered`). A failing ticker
// never aborts its siblings: it is logged and dropped from the result. The
// surviving reports are ordered by clarity (|up - down|, descending), ties
// keeping the order in which the tickers were submitted.
//
// Only the provider fetches overlap. Every future is polled by the batch
// task itself, so the indicator math for each ticker runs serially on it.
// =============================================================================

use std::sync::Arc;

use futures_util::{stream, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{self, AnalysisError, AnalysisReport, Analyzer};
use crate::market_data::MarketDataProvider;
use crate::types::Interval;

/// Maximum analyses in flight at once.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no ticker in the batch could be analyzed")]
    NoResults,
}

#[derive(Clone)]
pub struct BatchRunner {
    provider: Arc<dyn MarketDataProvider>,
    analyzer: Analyzer,
    concurrency: usize,
}

impl BatchRunner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, analyzer: Analyzer, concurrency: usize) -> Self {
        Self {
            provider,
            analyzer,
            concurrency: concurrency.max(1),
        }
    }

    /// Analyze every distinct ticker and return the successful reports ranked
    /// by clarity.
    pub async fn analyze_many<S: AsRef<str>>(
        &self,
        tickers: &[S],
        interval: Interval,
    ) -> Result<Vec<AnalysisReport>, BatchError> {
        let unique = dedupe(tickers);
        let requested = unique.len();

        let mut outcomes: Vec<(usize, AnalysisReport)> = stream::iter(unique.into_iter().enumerate())
            .map(|(idx, ticker)| async move {
                let outcome =
                    analysis::analyze_ticker(self.provider.as_ref(), &self.analyzer, &ticker, interval).await;
                (idx, ticker, outcome)
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|(idx, ticker, outcome)| async move {
                match outcome {
                    Ok(report) => Some((idx, report)),
                    Err(e) => {
                        log_dropped(&ticker, &e);
                        None
                    }
                }
            })
            .collect()
            .await;

        if outcomes.is_empty() {
            warn!(requested, %interval, "batch produced no results");
            return Err(BatchError::NoResults);
        }

        outcomes.sort_by(|(ia, a), (ib, b)| b.clarity().cmp(&a.clarity()).then(ia.cmp(ib)));

        info!(requested, analyzed = outcomes.len(), %interval, "batch complete");
        Ok(outcomes.into_iter().map(|(_, report)| report).collect())
    }
}

/// Normalised tickers with blanks removed, first occurrence wins.
fn dedupe<S: AsRef<str>>(tickers: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tickers
        .iter()
        .map(|t| analysis::normalize_ticker(t.as_ref()))
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn log_dropped(ticker: &str, err: &AnalysisError) {
    match err {
        AnalysisError::Indicator(_) => warn!(ticker, error = %err, "dropping ticker from batch"),
        _ => debug!(ticker, error = %err, "dropping ticker from batch"),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::fixture::{falling, rising, FixtureProvider};

    fn runner(provider: FixtureProvider) -> BatchRunner {
        BatchRunner::new(Arc::new(provider), Analyzer::default(), 4)
    }

    /// Constant series: 0 UP / 5 DOWN, clarity 5.
    fn flat() -> Vec<f64> {
        vec![100.0; 250]
    }

    #[tokio::test]
    async fn failed_ticker_is_dropped_silently() {
        let provider = FixtureProvider::new().with("BBB", &rising(250, 50.0, 0.5));
        let reports = runner(provider).analyze_many(&["AAA", "BBB"], Interval::Day).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].ticker, "BBB");
    }

    #[tokio::test]
    async fn short_history_is_dropped_too() {
        let provider = FixtureProvider::new()
            .with("SHORT", &rising(50, 50.0, 0.5))
            .with("LONG", &flat());
        let reports = runner(provider).analyze_many(&["SHORT", "LONG"], Interval::Day).await.unwrap();
        let tickers: Vec<_> = reports.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["LONG"]);
    }

    #[tokio::test]
    async fn all_failures_is_no_results() {
        let err = runner(FixtureProvider::new())
            .analyze_many(&["AAA", "BBB"], Interval::Day)
            .await
            .unwrap_err();
        assert_eq!(err, BatchError::NoResults);
    }

    #[tokio::test]
    async fn reports_are_sorted_by_clarity() {
        let provider = FixtureProvider::new()
            .with("UP", &rising(300, 100.0, 1.0))
            .with("DOWN", &falling(300, 500.0, 1.0))
            .with("FLAT", &flat());
        let reports = runner(provider)
            .analyze_many(&["UP", "DOWN", "FLAT"], Interval::Day)
            .await
            .unwrap();
        assert_eq!(reports.len(), 3);
        for pair in reports.windows(2) {
            assert!(pair[0].clarity() >= pair[1].clarity());
        }
    }

    #[tokio::test]
    async fn equal_clarity_keeps_submission_order() {
        let provider = FixtureProvider::new()
            .with("CCC", &flat())
            .with("AAA", &flat())
            .with("BBB", &flat());
        let reports = runner(provider)
            .analyze_many(&["ccc", " aaa", "BBB", "CCC"], Interval::Day)
            .await
            .unwrap();
        let tickers: Vec<_> = reports.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        assert_eq!(dedupe(&["b", "a", " B ", "", "c"]), vec!["B", "A", "C"]);
    }
}
