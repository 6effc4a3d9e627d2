// =============================================================================
// Vote Rules — latest indicator reading(s) => UP / DOWN / NEUTRAL
// =============================================================================
//
// Oscillators (RSI, Stochastic, CCI, Williams %R, Bollinger position) are read
// contrarian: an overbought reading votes DOWN, an oversold one votes UP.
// Trend rules (MACD, SMA cross, EMA trend, ROC, slope) are binary and treat
// equality as DOWN ("not strictly greater").
// =============================================================================

use crate::indicators::bollinger::BollingerResult;
use crate::types::Vote;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const STOCH_OVERBOUGHT: f64 = 80.0;
pub const STOCH_OVERSOLD: f64 = 20.0;
pub const CCI_OVERBOUGHT: f64 = 100.0;
pub const CCI_OVERSOLD: f64 = -100.0;
pub const WILLIAMS_OVERBOUGHT: f64 = -20.0;
pub const WILLIAMS_OVERSOLD: f64 = -80.0;

/// Fraction of the band range treated as the upper / lower extreme zone.
pub const BOLLINGER_ZONE: f64 = 0.2;

fn oscillator(value: f64, overbought: f64, oversold: f64) -> Vote {
    if value > overbought {
        Vote::Down
    } else if value < oversold {
        Vote::Up
    } else {
        Vote::Neutral
    }
}

fn above(value: f64, reference: f64) -> Vote {
    if value > reference {
        Vote::Up
    } else {
        Vote::Down
    }
}

pub fn rsi_vote(rsi: f64) -> Vote {
    oscillator(rsi, RSI_OVERBOUGHT, RSI_OVERSOLD)
}

pub fn macd_vote(line: f64, signal: f64) -> Vote {
    above(line, signal)
}

pub fn sma_cross_vote(sma_fast: f64, sma_slow: f64) -> Vote {
    above(sma_fast, sma_slow)
}

/// Close in the lowest 20% of the band range votes UP, in the highest 20%
/// votes DOWN. A collapsed band (zero range) is NEUTRAL.
pub fn bollinger_vote(close: f64, bands: &BollingerResult) -> Vote {
    let zone = bands.range() * BOLLINGER_ZONE;
    if close < bands.lower + zone {
        Vote::Up
    } else if close > bands.upper - zone {
        Vote::Down
    } else {
        Vote::Neutral
    }
}

pub fn stochastic_vote(k: f64) -> Vote {
    oscillator(k, STOCH_OVERBOUGHT, STOCH_OVERSOLD)
}

pub fn ema_trend_vote(close: f64, ema: f64) -> Vote {
    above(close, ema)
}

pub fn cci_vote(cci: f64) -> Vote {
    oscillator(cci, CCI_OVERBOUGHT, CCI_OVERSOLD)
}

pub fn williams_vote(r: f64) -> Vote {
    oscillator(r, WILLIAMS_OVERBOUGHT, WILLIAMS_OVERSOLD)
}

pub fn roc_vote(roc: f64) -> Vote {
    above(roc, 0.0)
}

pub fn slope_vote(slope: f64) -> Vote {
    above(slope, 0.0)
}
