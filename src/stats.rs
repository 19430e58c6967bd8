//! Empirical quantiles over distance samples.
//!
//! Uses linear interpolation between order statistics: for `n` ascending
//! samples the quantile at `level` sits at position `level * (n - 1)`.
//!
//! ```text
//! samples = [0.1, 0.2, 0.4, 0.8]
//! level   = 0.5  ->  position 1.5  ->  0.2 + 0.5 * (0.4 - 0.2) = 0.3
//! ```
//!
//! The value is non-decreasing in `level`, which the threshold search relies
//! on when it halves the level to tighten a partition.

use crate::error::{Error, Result};

/// Quantile of `samples` at `level` in `[0, 1]`.
///
/// # Errors
///
/// - [`Error::EmptySample`] when `samples` is empty.
/// - [`Error::InvalidParameter`] when `level` is NaN or outside `[0, 1]`.
pub fn quantile(samples: &[f64], level: f64) -> Result<f64> {
    Quantiles::new(samples)?.quantile(level)
}

/// Samples sorted once for repeated quantile queries.
#[derive(Debug, Clone)]
pub struct Quantiles {
    sorted: Vec<f64>,
}

impl Quantiles {
    /// Sort `samples` for querying.
    pub fn new(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptySample);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(Self { sorted })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always false; empty samples are rejected by [`Quantiles::new`].
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Smallest sample.
    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    /// Largest sample.
    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Quantile at `level`.
    pub fn quantile(&self, level: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&level) {
            return Err(Error::InvalidParameter {
                name: "level",
                message: "quantile level must lie in [0, 1]",
            });
        }

        let position = level * (self.sorted.len() - 1) as f64;
        let lo = position.floor() as usize;
        let hi = position.ceil() as usize;
        let frac = position - lo as f64;
        Ok(self.sorted[lo] + (self.sorted[hi] - self.sorted[lo]) * frac)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interpolates_between_order_statistics() {
        let samples = [0.8, 0.1, 0.4, 0.2];
        assert!((quantile(&samples, 0.5).unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(quantile(&samples, 0.0).unwrap(), 0.1);
        assert_eq!(quantile(&samples, 1.0).unwrap(), 0.8);
    }

    #[test]
    fn test_single_sample_is_constant() {
        for level in [0.0, 0.025, 0.4, 0.8, 1.0] {
            assert_eq!(quantile(&[0.37], level).unwrap(), 0.37);
        }
    }

    #[test]
    fn test_empty_sample() {
        assert!(matches!(quantile(&[], 0.5), Err(Error::EmptySample)));
    }

    #[test]
    fn test_level_out_of_range() {
        let q = Quantiles::new(&[1.0, 2.0]).unwrap();
        assert!(q.quantile(1.5).is_err());
        assert!(q.quantile(-0.1).is_err());
        assert!(q.quantile(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn quantile_is_monotone_in_level(
            samples in proptest::collection::vec(0.0f64..10.0, 1..60),
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let q = Quantiles::new(&samples).unwrap();
            let v_lo = q.quantile(lo).unwrap();
            let v_hi = q.quantile(hi).unwrap();
            prop_assert!(v_lo <= v_hi + 1e-12);
            prop_assert!(q.min() <= v_lo + 1e-12 && v_hi <= q.max() + 1e-12);
        }
    }
}
