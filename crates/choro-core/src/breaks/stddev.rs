//! Standard-deviation classification.
//!
//! Boundaries sit at mean ± 0.5σ, ±1.5σ, ±2.5σ, ±3.5σ. Each direction stops
//! at the first candidate not strictly inside (min, max), so the number of
//! classes depends on the data rather than on the requested class count.
//! The lowest class opens at the data minimum and carries no σ label.
use crate::stats::{extent, mean, std_dev};

/// Ladder steps tried in each direction.
pub const MAX_STEPS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct StdDevBreaks {
    /// Ascending boundaries, `boundaries[0]` = min.
    pub boundaries: Vec<f64>,
    /// Signed σ multiple per boundary (`None` for the minimum).
    pub labels: Vec<Option<f64>>,
}

pub fn stddev_breaks(values: &[f64]) -> StdDevBreaks {
    let (Some((min, max)), Some(avg), Some(sd)) = (extent(values), mean(values), std_dev(values)) else {
        return StdDevBreaks { boundaries: Vec::new(), labels: Vec::new() };
    };
    let inside = |c: f64| c > min && c < max;

    let mut below = Vec::new();
    for step in 0..MAX_STEPS {
        let multiple = -(0.5 + step as f64);
        let candidate = avg + multiple * sd;
        if !inside(candidate) {
            break;
        }
        below.push((candidate, multiple));
    }

    let mut above = Vec::new();
    for step in 0..MAX_STEPS {
        let multiple = 0.5 + step as f64;
        let candidate = avg + multiple * sd;
        if !inside(candidate) {
            break;
        }
        above.push((candidate, multiple));
    }

    let ladder = below.into_iter().rev().chain(above);
    let mut boundaries = vec![min];
    let mut labels = vec![None];
    for (b, m) in ladder {
        boundaries.push(b);
        labels.push(Some(m));
    }
    StdDevBreaks { boundaries, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn symmetric_ladder_on_uniform_data() {
        // 0..=100: mean 50, σ ≈ 29.15; ±0.5σ and ±1.5σ fit, ±2.5σ do not.
        let values: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let sd = std_dev(&values).unwrap();
        let r = stddev_breaks(&values);
        assert_eq!(r.labels, vec![None, Some(-1.5), Some(-0.5), Some(0.5), Some(1.5)]);
        assert_eq!(r.boundaries[0], 0.0);
        assert_relative_eq!(r.boundaries[1], 50.0 - 1.5 * sd, epsilon = 1e-9);
        assert_relative_eq!(r.boundaries[4], 50.0 + 1.5 * sd, epsilon = 1e-9);
        assert!(r.boundaries.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn at_most_four_steps_per_side() {
        // A couple of extreme outliers stretch the extent far past 3.5σ.
        let mut values: Vec<f64> = (0..1000).map(|i| (i % 10) as f64).collect();
        values.push(-1.0e6);
        values.push(1.0e6);
        let r = stddev_breaks(&values);
        assert!(r.boundaries.len() <= 1 + 2 * MAX_STEPS);
    }

    #[test]
    fn skewed_data_is_asymmetric() {
        let mut values = vec![0.0; 50];
        values.extend((1..=50).map(|i| (i * i) as f64));
        let r = stddev_breaks(&values);
        let negatives = r.labels.iter().flatten().filter(|m| **m < 0.0).count();
        let positives = r.labels.iter().flatten().filter(|m| **m > 0.0).count();
        assert!(positives > negatives, "labels: {:?}", r.labels);
    }

    #[test]
    fn constant_data_has_only_the_minimum() {
        let r = stddev_breaks(&[3.0, 3.0, 3.0]);
        assert_eq!(r.boundaries, vec![3.0]);
    }
}
