// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
//   avg_gain_t = (avg_gain_{t-1} * (n - 1) + gain_t) / n      (same for loss)
//   RSI        = 100 - 100 / (1 + avg_gain / avg_loss)
//
// Both averages are seeded with the plain mean of the first `n` deltas. A
// window with no losses reads 100; one with no movement at all reads 50.
// =============================================================================

/// Default RSI look-back.
pub const RSI_PERIOD: usize = 14;

/// Running Wilder averages of gains and losses.
#[derive(Debug, Clone, Copy)]
struct WilderAverages {
    gain: f64,
    loss: f64,
    period: f64,
}

impl WilderAverages {
    fn seed(deltas: &[f64]) -> Self {
        let period = deltas.len() as f64;
        let gain = deltas.iter().filter(|d| **d > 0.0).sum::<f64>() / period;
        let loss = deltas.iter().filter(|d| **d < 0.0).map(|d| -d).sum::<f64>() / period;
        Self { gain, loss, period }
    }

    fn push(&mut self, delta: f64) {
        let (gain, loss) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };
        self.gain = (self.gain * (self.period - 1.0) + gain) / self.period;
        self.loss = (self.loss * (self.period - 1.0) + loss) / self.period;
    }

    fn rsi(&self) -> Option<f64> {
        let value = match (self.gain == 0.0, self.loss == 0.0) {
            (true, true) => 50.0,
            (_, true) => 100.0,
            _ => 100.0 - 100.0 / (1.0 + self.gain / self.loss),
        };
        value.is_finite().then_some(value)
    }
}

/// Full RSI series, one value per close from index `period` onwards.
///
/// Empty when `period == 0` or there are fewer than `period + 1` closes. A
/// non-finite value stops the series at that point.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let mut averages = WilderAverages::seed(&deltas[..period]);

    let mut out = Vec::with_capacity(deltas.len() + 1 - period);
    let Some(first) = averages.rsi() else {
        return out;
    };
    out.push(first);

    for &delta in &deltas[period..] {
        averages.push(delta);
        match averages.rsi() {
            Some(v) => out.push(v),
            None => break,
        }
    }
    out
}

/// Latest RSI, or `None` if the look-back is unmet or the series broke off
/// before the last close.
pub fn current_rsi(closes: &[f64], period: usize) -> Option<f64> {
    let series = calculate_rsi(closes, period);
    if series.is_empty() || series.len() != closes.len() - period {
        return None;
    }
    series.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|x| x as f64).collect()
    }

    #[test]
    fn needs_period_plus_one_closes() {
        assert!(calculate_rsi(&[], 14).is_empty());
        assert!(calculate_rsi(&[1.0, 2.0, 3.0], 0).is_empty());
        assert!(calculate_rsi(&ramp(14), 14).is_empty());
        assert_eq!(calculate_rsi(&ramp(15), 14).len(), 1);
    }

    #[test]
    fn one_sided_markets_pin_the_extremes() {
        assert!(calculate_rsi(&ramp(40), 14).iter().all(|v| (*v - 100.0).abs() < 1e-10));

        let mut down = ramp(40);
        down.reverse();
        assert!(calculate_rsi(&down, 14).iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn flat_market_reads_fifty() {
        assert_eq!(current_rsi(&[250.0; 30], 14), Some(50.0));
    }

    #[test]
    fn wilder_reference_values() {
        // Wilder's worked example, period 14.
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03, 45.61, 46.28,
            46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 6);
        assert!((series[0] - 70.46).abs() < 0.01, "got {}", series[0]);
        assert!((series[5] - 57.92).abs() < 0.01, "got {}", series[5]);
        assert!(series.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn current_rsi_rejects_broken_series() {
        let mut closes = ramp(30);
        closes[20] = f64::NAN;
        assert!(current_rsi(&closes, 14).is_none());
        assert!(current_rsi(&[], 14).is_none());
    }
}
