//! Incremental statistics accumulator for Monte Carlo samples.

use hmc_core::{Real, Size};

/// Accumulates samples and reports mean, variance, standard deviation,
/// the Monte Carlo error estimate, min, max and count.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: Size,
    sum_x: Real,
    sum_x2: Real,
    min: Real,
    max: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum_x: 0.0,
            sum_x2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum_x += x;
        self.sum_x2 += x * x;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Number of samples.
    pub fn samples(&self) -> Size {
        self.count
    }

    /// Arithmetic mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_x / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) variance.  Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum_x / n;
        // rounding can leave a tiny negative residue for constant samples
        let s2 = (self.sum_x2 / n - m * m).max(0.0);
        Some(s2 * n / (n - 1.0))
    }

    /// Standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(|v| v.sqrt())
    }

    /// Standard error of the mean, `σ / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Minimum sample value.  Returns `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  Returns `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic_statistics() {
        let s: Statistics = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev().unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            s.error_estimate().unwrap(),
            (2.5_f64 / 5.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(s.minimum().unwrap(), 1.0);
        assert_eq!(s.maximum().unwrap(), 5.0);
    }

    #[test]
    fn constant_samples_have_zero_error() {
        let s: Statistics = std::iter::repeat(0.0).take(10).collect();
        assert_eq!(s.variance(), Some(0.0));
        assert_eq!(s.error_estimate(), Some(0.0));
    }

    #[test]
    fn empty_statistics() {
        let mut s = Statistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        assert!(s.minimum().is_none());
        s.add(1.0);
        assert!(s.variance().is_none());
        s.reset();
        assert_eq!(s.samples(), 0);
    }
}
