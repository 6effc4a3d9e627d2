//! In-memory provider and series builders for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use super::bar::{Bar, PriceSeries};
use super::provider::{CompanyProfile, HistoryRequest, MarketDataProvider, MarketSnapshot, ProviderError};

/// Build a daily series from closes; high/low sit one unit around the close.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1_000.0))
        .collect();
    PriceSeries::from_bars(bars).unwrap()
}

/// Strictly increasing closes: start, start+step, ...
pub fn rising(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Strictly decreasing closes.
pub fn falling(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| start - step * i as f64).collect()
}

/// Snapshot with a placeholder company profile.
pub fn snapshot(ticker: &str, closes: &[f64]) -> MarketSnapshot {
    MarketSnapshot {
        series: series_from_closes(closes),
        company: CompanyProfile::new(ticker, Some(format!("{ticker} Corp")), None),
    }
}

/// Serves canned snapshots; unknown tickers fail like a delisted symbol.
#[derive(Default)]
pub struct FixtureProvider {
    snapshots: HashMap<String, MarketSnapshot>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.snapshots.insert(ticker.to_string(), snapshot(ticker, closes));
        self
    }
}

#[async_trait]
impl MarketDataProvider for FixtureProvider {
    async fn fetch_history(&self, req: &HistoryRequest) -> Result<MarketSnapshot, ProviderError> {
        self.snapshots
            .get(&req.ticker)
            .cloned()
            .ok_or_else(|| ProviderError::Empty {
                ticker: req.ticker.clone(),
            })
    }
}
