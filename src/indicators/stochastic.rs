// =============================================================================
// Stochastic Oscillator (%K) and Williams %R
// =============================================================================
//
// Both oscillators locate the close inside the highest-high / lowest-low range
// of the look-back window:
//
//   %K = (close - LL) / (HH - LL) * 100          range   0 .. 100
//   %R = (HH - close) / (HH - LL) * -100         range -100 .. 0
//
// A window with zero range has no defined position; %K reports the midpoint
// 50 and %R reports -50.
// =============================================================================

/// Default %K look-back.
pub const STOCH_PERIOD: usize = 14;
/// Default Williams %R look-back.
pub const WILLIAMS_PERIOD: usize = 14;

/// Compute the %K series. Output is end-aligned, starting at index
/// `period - 1`.
///
/// Returns an empty vec when the slices differ in length, `period == 0`, or
/// there are fewer than `period` bars.
pub fn calculate_stochastic_k(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    range_position(high, low, close, period)
        .into_iter()
        .map(|pos| pos.map_or(50.0, |p| p * 100.0))
        .collect()
}

/// Compute the Williams %R series. Output is end-aligned, starting at index
/// `period - 1`.
pub fn calculate_williams_r(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    range_position(high, low, close, period)
        .into_iter()
        .map(|pos| pos.map_or(-50.0, |p| (1.0 - p) * -100.0))
        .collect()
}

/// Position of each close within its window's high/low range as a fraction
/// in [0, 1]. `None` marks a window with no range.
fn range_position(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = close.len();
    if period == 0 || n < period || high.len() != n || low.len() != n {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(n - period + 1);
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let highest = high[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = low[start..=i].iter().copied().fold(f64::INFINITY, f64::min);

        let range = highest - lowest;
        if range.abs() < 1e-10 {
            result.push(None);
        } else {
            result.push(Some((close[i] - lowest) / range));
        }
    }
    result
}
