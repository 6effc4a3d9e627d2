// =============================================================================
// Linear Regression Slope
// =============================================================================
//
// Ordinary least squares over the last `window` closes indexed 0..window-1:
//   slope     = Σ((x-x̄)(y-ȳ)) / Σ((x-x̄)²)
//   intercept = ȳ - slope * x̄

/// Number of trailing closes fitted.
pub const SLOPE_WINDOW: usize = 10;

/// Least-squares line fitted to the tail of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at index `x`.
    pub fn at(&self, x: usize) -> f64 {
        self.intercept + self.slope * x as f64
    }
}

/// Fit a line to the last `window` values.
///
/// Returns `None` when `window < 2`, there are fewer than `window` values, or
/// the fit is non-finite.
pub fn fit_tail(values: &[f64], window: usize) -> Option<LinearFit> {
    if window < 2 || values.len() < window {
        return None;
    }

    let ys = &values[values.len() - window..];
    let n = window as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    (slope.is_finite() && intercept.is_finite()).then_some(LinearFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_exact_line() {
        let values: Vec<f64> = (0..30).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = fit_tail(&values, SLOPE_WINDOW).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-10);
        // Tail starts at i = 20 => y = 43 at local x = 0.
        assert!((fit.at(0) - 43.0).abs() < 1e-10);
        assert!((fit.at(9) - 61.0).abs() < 1e-10);
    }

    #[test]
    fn fit_flat_has_zero_slope() {
        let fit = fit_tail(&[7.0; 10], 10).unwrap();
        assert!(fit.slope.abs() < 1e-12);
        assert!((fit.intercept - 7.0).abs() < 1e-12);
    }

    #[test]
    fn fit_rejects_short_input() {
        assert!(fit_tail(&[1.0, 2.0], 10).is_none());
        assert!(fit_tail(&[1.0, 2.0], 1).is_none());
    }

    #[test]
    fn fit_falling_series_negative() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 - i as f64 * 0.5).collect();
        assert!(fit_tail(&values, 10).unwrap().slope < 0.0);
    }
}
