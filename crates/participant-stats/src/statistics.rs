//! Numeric Summary Statistics

use serde::{Deserialize, Serialize};

/// Location and spread of a numeric sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    /// Number of numeric values
    pub count: usize,
    /// Arithmetic mean (undefined when empty)
    pub mean: Option<f64>,
    /// Median (undefined when empty)
    pub median: Option<f64>,
    /// Sample standard deviation, n - 1 denominator (undefined below two values)
    pub std_dev: Option<f64>,
}

impl NumericStatistics {
    /// Compute statistics from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std_dev = if values.len() >= 2 {
            let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            Some((m2 / (n - 1.0)).sqrt())
        } else {
            None
        };

        Self {
            count: values.len(),
            mean: Some(mean),
            median: Some(median),
            std_dev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean_and_median() {
        let stats = NumericStatistics::compute(&[30.0, 20.0, 25.0, 41.0]);
        assert!((stats.mean.unwrap() - 29.0).abs() < 1e-12);
        assert!((stats.median.unwrap() - 27.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = NumericStatistics::compute(&values);
        // Population SD is 2.0; sample SD = sqrt(32 / 7)
        assert!((stats.std_dev.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_no_spread() {
        let stats = NumericStatistics::compute(&[42.0]);
        assert_eq!(stats.mean, Some(42.0));
        assert_eq!(stats.median, Some(42.0));
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn test_empty_values() {
        let stats = NumericStatistics::compute(&[]);
        assert_eq!(stats, NumericStatistics::default());
    }

    proptest! {
        #[test]
        fn prop_median_within_range(values in proptest::collection::vec(0.0f64..120.0, 1..50)) {
            let stats = NumericStatistics::compute(&values);
            let min = values.iter().cloned().fold(f64::MAX, f64::min);
            let max = values.iter().cloned().fold(f64::MIN, f64::max);
            let median = stats.median.unwrap();
            prop_assert!(median >= min && median <= max);
            prop_assert!(stats.std_dev.map_or(true, |sd| sd >= 0.0));
        }
    }
}
