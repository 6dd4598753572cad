//! Quantile classification: every class holds roughly the same number of
//! features.
use crate::stats::{quantile_sorted, sorted};

/// `boundary[i]` = quantile `i / class_count` of the values, for
/// `i` in `0..class_count`. Boundary 0 is therefore the minimum.
///
/// Heavily repeated values can yield equal neighbouring boundaries.
pub fn quantile_breaks(values: &[f64], class_count: usize) -> Vec<f64> {
    let sorted = sorted(values);
    (0..class_count)
        .filter_map(|i| quantile_sorted(&sorted, i as f64 / class_count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_boundary_is_minimum() {
        let values = [9.0, 3.0, 7.0, 1.0, 5.0, 2.0, 8.0];
        let b = quantile_breaks(&values, 3);
        assert_eq!(b.len(), 3);
        assert_eq!(b[0], 1.0);
    }

    #[test]
    fn quartiles_of_one_to_twenty() {
        let values: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        // idx = 20 · p: 5, 10, 15 are integral on an even sample → midpoints.
        assert_eq!(quantile_breaks(&values, 4), vec![1.0, 5.5, 10.5, 15.5]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a: Vec<f64> = (0..50).map(|i| (i * 7 % 50) as f64).collect();
        let mut b = a.clone();
        b.reverse();
        assert_eq!(quantile_breaks(&a, 5), quantile_breaks(&b, 5));
    }
}
