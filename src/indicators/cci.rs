// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
// TP  = (high + low + close) / 3
// CCI = (TP - SMA(TP)) / (0.015 * mean absolute deviation of TP)
//
// Readings above +100 are treated as overbought, below -100 as oversold.
// =============================================================================

use super::sma::calculate_sma;

/// Default CCI look-back.
pub const CCI_PERIOD: usize = 20;

/// Lambert's scaling constant.
const CCI_CONSTANT: f64 = 0.015;

/// Compute the CCI series, end-aligned starting at index `period - 1`.
///
/// A window with zero mean deviation yields 0.0.
pub fn calculate_cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = close.len();
    if period == 0 || n < period || high.len() != n || low.len() != n {
        return Vec::new();
    }

    let typical: Vec<f64> = (0..n).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();
    let tp_sma = calculate_sma(&typical, period);

    typical
        .windows(period)
        .zip(tp_sma.iter())
        .map(|(window, &mean)| {
            let mean_dev = window.iter().map(|x| (x - mean).abs()).sum::<f64>() / period as f64;
            let latest = window[period - 1];
            if mean_dev > 0.0 {
                (latest - mean) / (CCI_CONSTANT * mean_dev)
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cci_insufficient_data() {
        let closes = vec![1.0; 10];
        assert!(calculate_cci(&closes, &closes, &closes, 20).is_empty());
    }

    #[test]
    fn cci_flat_is_zero() {
        let closes = vec![42.0; 40];
        let cci = calculate_cci(&closes, &closes, &closes, 20);
        assert_eq!(cci.len(), 21);
        assert!(cci.iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn cci_strong_uptrend_is_overbought() {
        // On a linear ramp the latest TP sits (period-1)/2 steps above the mean
        // while the mean deviation is period/4 steps: CCI = 9.5 / (0.015 * 5).
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let cci = calculate_cci(&closes, &closes, &closes, 20);
        let last = *cci.last().unwrap();
        assert!((last - 9.5 / (0.015 * 5.0)).abs() < 1e-6, "got {last}");
        assert!(last > 100.0);
    }
}
