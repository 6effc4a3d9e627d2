// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line   = EMA(fast) - EMA(slow)
// Signal line = EMA(signal) of the MACD line
// Histogram   = MACD line - Signal line
//
// Both output series are end-aligned with the input closes.
// =============================================================================

use super::ema::calculate_ema;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// MACD line and signal line, end-aligned with the input.
///
/// `line` starts at close index `slow - 1`; `signal` starts at close index
/// `slow + signal - 2`, so `signal.len() <= line.len()`.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdSeries {
    /// Latest (line, signal) pair.
    pub fn latest(&self) -> Option<(f64, f64)> {
        let line = *self.line.last()?;
        let signal = *self.signal.last()?;
        (line.is_finite() && signal.is_finite()).then_some((line, signal))
    }
}

/// Compute MACD with the given periods.
///
/// Returns an empty [`MacdSeries`] when `fast >= slow`, any period is zero, or
/// there is not enough data for a single signal value.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    if fast == 0 || signal == 0 || fast >= slow || closes.len() < slow + signal - 1 {
        return MacdSeries::default();
    }

    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);

    // A truncated EMA (non-finite input) would misalign the two legs.
    if fast_ema.len() != closes.len() - fast + 1 || slow_ema.len() != closes.len() - slow + 1 {
        return MacdSeries::default();
    }

    // Align the fast EMA to the slow EMA's start.
    let offset = fast_ema.len() - slow_ema.len();
    let line: Vec<f64> = fast_ema[offset..]
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&line, signal);

    MacdSeries {
        line,
        signal: signal_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_insufficient_data() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let macd = calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        assert!(macd.line.is_empty());
        assert!(macd.latest().is_none());
    }

    #[test]
    fn macd_invalid_periods() {
        let closes = vec![1.0; 100];
        assert!(calculate_macd(&closes, 26, 12, 9).line.is_empty());
        assert!(calculate_macd(&closes, 0, 26, 9).line.is_empty());
    }

    #[test]
    fn macd_alignment() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let macd = calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        assert_eq!(macd.line.len(), 100 - 26 + 1);
        assert_eq!(macd.signal.len(), macd.line.len() - 9 + 1);
    }

    #[test]
    fn macd_flat_is_zero() {
        let closes = vec![100.0; 100];
        let (line, signal) = calculate_macd(&closes, 12, 26, 9).latest().unwrap();
        assert!(line.abs() < 1e-10);
        assert!(signal.abs() < 1e-10);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (1..=200).map(|x| x as f64).collect();
        let (line, _) = calculate_macd(&closes, 12, 26, 9).latest().unwrap();
        assert!(line > 0.0);
    }

    #[test]
    fn macd_turning_up_crosses_signal() {
        // Long decline followed by a sharp rally: line should lead the signal.
        let mut closes: Vec<f64> = (0..150).map(|i| 300.0 - i as f64).collect();
        closes.extend((0..15).map(|i| 150.0 + i as f64 * 6.0));
        let macd = calculate_macd(&closes, 12, 26, 9);
        let (line, signal) = macd.latest().unwrap();
        assert!(line > signal);
    }
}
