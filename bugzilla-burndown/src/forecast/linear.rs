//! Least-squares line fitting.

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits a line through `points` by ordinary least squares.
    ///
    /// Returns `None` for fewer than two points or when every `x` is equal.
    #[must_use]
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (covariance, variance) = points.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
            let dx = x - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

        if variance == 0.0 {
            return None;
        }

        let slope = covariance / variance;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predicts a whole, non-negative count: rounded up, clamped at zero.
    #[must_use]
    pub fn predict_count(&self, x: f64) -> i64 {
        let y = self.predict(x);
        if y <= 0.0 {
            0
        } else {
            y.ceil() as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exact_line() {
        let fit = LinearFit::fit(&[(0.0, 10.0), (1.0, 8.0), (2.0, 6.0)]).unwrap();

        assert!((fit.slope + 2.0).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-9);
        assert_eq!(fit.predict_count(4.0), 2);
        assert_eq!(fit.predict_count(4.5), 1);
        assert_eq!(fit.predict_count(9.0), 0);
    }

    #[test]
    fn needs_two_distinct_x_values() {
        assert_eq!(LinearFit::fit(&[]), None);
        assert_eq!(LinearFit::fit(&[(1.0, 2.0)]), None);
        assert_eq!(LinearFit::fit(&[(1.0, 2.0), (1.0, 5.0)]), None);
    }
}
