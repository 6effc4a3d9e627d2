// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ). σ is the population standard deviation of the
// window.

/// Default look-back window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Default band width in standard deviations.
pub const BOLLINGER_STD: f64 = 2.0;

/// One Bollinger Band sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerResult {
    /// Distance between the outer bands.
    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Calculate the Bollinger Bands ending on the last close.
///
/// Returns `None` when there are fewer than `period` data points or any band
/// is non-finite.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerResult> {
    if period == 0 || closes.len() < period {
        return None;
    }
    bands_for_window(&closes[closes.len() - period..], num_std)
}

/// Calculate the full Bollinger series, one sample per window.
///
/// The output is end-aligned with `closes` (first sample ends at index
/// `period - 1`). Windows producing non-finite bands are emitted as NaN so the
/// alignment is preserved.
pub fn bollinger_series(closes: &[f64], period: usize, num_std: f64) -> Vec<BollingerResult> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    closes
        .windows(period)
        .map(|w| {
            bands_for_window(w, num_std).unwrap_or(BollingerResult {
                upper: f64::NAN,
                middle: f64::NAN,
                lower: f64::NAN,
            })
        })
        .collect()
}

fn bands_for_window(window: &[f64], num_std: f64) -> Option<BollingerResult> {
    let n = window.len() as f64;
    let middle = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    if upper.is_finite() && lower.is_finite() {
        Some(BollingerResult {
            upper,
            middle,
            lower,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!((bb.middle - 10.5).abs() < 1e-10);
        assert!(bb.range() > 0.0);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_bollinger(&closes, 20, 2.0).is_none());
        assert!(bollinger_series(&closes, 20, 2.0).is_empty());
    }

    #[test]
    fn bollinger_flat() {
        let closes = vec![100.0; 20];
        let bb = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert!(bb.range().abs() < 1e-10);
        assert!((bb.middle - 100.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_series_last_matches_single() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = bollinger_series(&closes, 20, 2.0);
        assert_eq!(series.len(), 41);
        let last = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert_eq!(series.last().copied().unwrap(), last);
    }
}
