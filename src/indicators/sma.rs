// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_t = (x_{t-period+1} + ... + x_t) / period
//
// Used directly for the 50/200 cross and as the building block for Bollinger
// Bands and CCI.
// =============================================================================

/// Compute the SMA series for `values` and look-back `period`.
///
/// Each output element corresponds to an input element starting at index
/// `period - 1`, so the last output is the SMA ending on the last input.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `values.len() < period` => empty vec
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);

    // Each window is summed on its own, so no error carries across windows.
    for window in values.windows(period) {
        result.push(window.iter().sum::<f64>() / period_f);
    }

    result
}

/// Return the most recent SMA value, or `None` when the look-back is unmet or
/// the value is non-finite.
pub fn current_sma(values: &[f64], period: usize) -> Option<f64> {
    calculate_sma(values, period)
        .last()
        .copied()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_and_zero_period() {
        assert!(calculate_sma(&[], 5).is_empty());
        assert!(calculate_sma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 4).is_empty());
        assert!(current_sma(&[1.0, 2.0, 3.0], 4).is_none());
    }

    #[test]
    fn sma_known_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&values, 3);
        assert_eq!(sma.len(), 3);
        assert!((sma[0] - 2.0).abs() < 1e-10);
        assert!((sma[1] - 3.0).abs() < 1e-10);
        assert!((sma[2] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn sma_flat_series() {
        let values = vec![100.0; 250];
        let v = current_sma(&values, 200).unwrap();
        assert!((v - 100.0).abs() < 1e-10);
    }
}
