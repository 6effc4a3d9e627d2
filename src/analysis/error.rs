use thiserror::Error;

use super::indicator::IndicatorKind;
use crate::market_data::ProviderError;

/// Reasons a single-ticker analysis can fail.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The provider could not deliver data for the ticker.
    #[error("could not fetch data for {ticker}: {source}")]
    FetchFailure {
        ticker: String,
        #[source]
        source: ProviderError,
    },

    #[error("insufficient history: {available} bars available, {required} required")]
    InsufficientHistory { required: usize, available: usize },

    /// An indicator produced no latest value.
    #[error("indicator {0} could not be computed")]
    Indicator(IndicatorKind),
}
