//! Equal-interval classification: the value range split into equal steps.
use crate::stats::extent;

/// `boundary[0]` = min, each further boundary one step of
/// `(max − min) / class_count` above the previous one.
///
/// Steps are accumulated, not multiplied, and exactly `class_count`
/// boundaries are produced regardless of floating-point drift near max.
pub fn equal_interval_breaks(values: &[f64], class_count: usize) -> Vec<f64> {
    let Some((min, max)) = extent(values) else {
        return Vec::new();
    };
    let step = (max - min) / class_count as f64;

    let mut boundaries = Vec::with_capacity(class_count);
    let mut current = min;
    for _ in 0..class_count {
        boundaries.push(current);
        current += step;
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_step_from_minimum() {
        let values = [12.0, 0.0, 100.0, 37.5];
        let b = equal_interval_breaks(&values, 4);
        assert_eq!(b.len(), 4);
        assert_eq!(b[0], 0.0);
        for w in b.windows(2) {
            assert_relative_eq!(w[1] - w[0], 25.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn exact_count_with_awkward_step() {
        // 0.1 steps accumulate rounding error; the count must not change.
        let values = [0.0, 0.7];
        for n in 3..=10 {
            assert_eq!(equal_interval_breaks(&values, n).len(), n);
        }
    }

    #[test]
    fn negative_range() {
        let b = equal_interval_breaks(&[-30.0, -10.0, 0.0], 3);
        assert_relative_eq!(b[0], -30.0);
        assert_relative_eq!(b[1], -20.0);
        assert_relative_eq!(b[2], -10.0);
    }
}
