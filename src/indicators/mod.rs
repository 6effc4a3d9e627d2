// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the vote
// pipeline. Series functions return end-aligned vectors (the last element
// belongs to the last bar); an empty vector or `None` signals insufficient
// data or a numerical edge case the caller must handle.

pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod macd;
pub mod regression;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
