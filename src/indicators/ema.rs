// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
//   k      = 2 / (period + 1)
//   EMA_t  = EMA_{t-1} + k * (close_t - EMA_{t-1})
//
// Seeded with the SMA of the first `period` closes, so the first value lands
// on index `period - 1`.
// =============================================================================

/// EMA series, end-aligned with `values`.
///
/// Empty when `period == 0` or there are fewer than `period` values. The
/// series stops early at the first non-finite value.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    if !seed.is_finite() {
        return Vec::new();
    }

    std::iter::once(seed)
        .chain(values[period..].iter().scan(seed, |prev, &v| {
            let next = v * k + *prev * (1.0 - k);
            if !next.is_finite() {
                return None;
            }
            *prev = next;
            Some(next)
        }))
        .collect()
}

/// Latest EMA, or `None` if the look-back is unmet or the series stopped
/// before the last value.
pub fn current_ema(values: &[f64], period: usize) -> Option<f64> {
    let series = calculate_ema(values, period);
    if series.is_empty() || series.len() != values.len() + 1 - period {
        return None;
    }
    series.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_or_degenerate_input() {
        assert!(calculate_ema(&[], 5).is_empty());
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
        assert!(calculate_ema(&[1.0, 2.0], 5).is_empty());
        assert!(current_ema(&[1.0, 2.0], 5).is_none());
    }

    #[test]
    fn seed_is_the_sma() {
        assert_eq!(calculate_ema(&[2.0, 4.0, 6.0], 3), vec![4.0]);
    }

    #[test]
    fn smoothing_steps() {
        // k = 1/3, seed = 3.0
        let series = calculate_ema(&[1.0, 2.0, 3.0, 4.0, 5.0, 9.0], 5);
        assert_eq!(series.len(), 2);
        assert!((series[1] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn stops_at_non_finite() {
        let values = [1.0, 2.0, 3.0, f64::NAN, 5.0];
        assert_eq!(calculate_ema(&values, 3), vec![2.0]);
        assert!(current_ema(&values, 3).is_none());
    }

    #[test]
    fn lags_a_rising_series() {
        let values: Vec<f64> = (1..=200).map(|i| i as f64).collect();
        let ema = current_ema(&values, 20).unwrap();
        assert!(ema < 200.0 && ema > 180.0);
    }
}
