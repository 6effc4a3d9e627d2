// =============================================================================
// Analyzer — one price series in, one AnalysisReport out
// =============================================================================
//
// Pure and deterministic: the same snapshot always yields the same report.
// Every indicator in `IndicatorKind::ALL` must produce a latest value, otherwise
// the whole analysis fails; there are no partial reports.
// =============================================================================

use tracing::debug;

use super::error::AnalysisError;
use super::indicator::{IndicatorKind, SeriesContext};
use super::report::AnalysisReport;
use crate::market_data::MarketSnapshot;
use crate::signals::VoteSummary;
use crate::types::Interval;

/// Minimum number of bars before any analysis is attempted (SMA 200).
pub const MIN_HISTORY_BARS: usize = 200;

/// Default number of trailing bars exposed in each chart.
pub const CHART_WINDOW: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    chart_window: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(CHART_WINDOW)
    }
}

impl Analyzer {
    pub fn new(chart_window: usize) -> Self {
        Self {
            chart_window: chart_window.max(1),
        }
    }

    /// Run every indicator over `snapshot` and tally the votes.
    pub fn analyze(
        &self,
        ticker: &str,
        interval: Interval,
        snapshot: &MarketSnapshot,
    ) -> Result<AnalysisReport, AnalysisError> {
        let series = &snapshot.series;
        if series.len() < MIN_HISTORY_BARS {
            return Err(AnalysisError::InsufficientHistory {
                required: MIN_HISTORY_BARS,
                available: series.len(),
            });
        }

        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let current_price = series.last_close().ok_or(AnalysisError::InsufficientHistory {
            required: MIN_HISTORY_BARS,
            available: 0,
        })?;

        let window = self.chart_window.min(series.len());
        let fmt = if interval.is_intraday() { "%Y-%m-%d %H:%M" } else { "%Y-%m-%d" };
        let labels: Vec<String> = series.bars()[series.len() - window..]
            .iter()
            .map(|b| b.date.format(fmt).to_string())
            .collect();

        let ctx = SeriesContext {
            closes: &closes,
            highs: &highs,
            lows: &lows,
            labels: &labels,
            window,
            current_price,
        };

        let results = IndicatorKind::ALL
            .iter()
            .map(|kind| kind.evaluate(&ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let summary = VoteSummary::from_votes(results.iter().map(|r| r.vote));

        debug!(
            ticker,
            %interval,
            bars = series.len(),
            up = summary.up_votes,
            down = summary.down_votes,
            neutral = summary.neutral_votes,
            decision = %summary.decision,
            "analysis complete"
        );

        Ok(AnalysisReport {
            ticker: ticker.to_string(),
            interval,
            company: snapshot.company.clone(),
            current_price,
            results,
            summary,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
