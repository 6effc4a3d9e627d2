// =============================================================================
// Rate of Change (ROC)
// =============================================================================
//
//   ROC_t = (close_t - close_{t-n}) / close_{t-n} * 100
//
// A zero reference close reads 0.0 instead of an infinite change.
// =============================================================================

/// Default ROC look-back.
pub const ROC_PERIOD: usize = 12;

/// ROC series, one value per close from index `period` onwards.
pub fn calculate_roc(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    closes
        .iter()
        .zip(&closes[period..])
        .map(|(&base, &close)| if base == 0.0 { 0.0 } else { (close - base) / base * 100.0 })
        .collect()
}

/// Latest finite ROC value.
pub fn current_roc(closes: &[f64], period: usize) -> Option<f64> {
    calculate_roc(closes, period).last().copied().filter(|v| v.is_finite())
}
