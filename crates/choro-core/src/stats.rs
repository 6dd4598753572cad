//! Descriptive statistics over attribute values.
//!
//! Callers pass finite values only; the extractor drops nulls before
//! anything reaches this module.

/// `(min, max)` of the values, `None` when empty.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N − 1).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Ascending copy of the values.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Sample quantile of an ascending slice.
///
/// With `idx = len · p`:
///   p = 0 → first element, p = 1 → last element;
///   fractional idx → `sorted[ceil(idx) − 1]`;
///   integral idx, even length → mean of `sorted[idx − 1]` and `sorted[idx]`;
///   integral idx, odd length → `sorted[idx]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let len = sorted.len();
    if len == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if p == 0.0 {
        return Some(sorted[0]);
    }
    if p == 1.0 {
        return Some(sorted[len - 1]);
    }
    let idx = len as f64 * p;
    if idx.fract() != 0.0 {
        return Some(sorted[idx.ceil() as usize - 1]);
    }
    let idx = idx as usize;
    if len % 2 == 0 {
        Some((sorted[idx - 1] + sorted[idx]) / 2.0)
    } else {
        Some(sorted[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn extent_of_empty_is_none() {
        assert!(extent(&[]).is_none());
        assert_eq!(extent(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
    }

    #[test]
    fn population_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&v).unwrap(), 5.0);
        assert_relative_eq!(std_dev(&v).unwrap(), 2.0);
    }

    #[test]
    fn quantile_endpoints() {
        let s = sorted(&[5.0, 1.0, 3.0, 2.0, 4.0]);
        assert_eq!(quantile_sorted(&s, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&s, 1.0), Some(5.0));
    }

    #[test]
    fn quantile_fractional_and_integral_index() {
        // len 10, p 0.25 → idx 2.5 → sorted[2]
        let s: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        assert_eq!(quantile_sorted(&s, 0.25), Some(3.0));
        // len 10, p 0.5 → idx 5, even length → mean of sorted[4], sorted[5]
        assert_eq!(quantile_sorted(&s, 0.5), Some(5.5));
        // len 5, p 0.4 → idx 2 (integral), odd length → sorted[2]
        let odd = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(quantile_sorted(&odd, 0.4), Some(30.0));
    }

    #[test]
    fn quantile_rejects_out_of_range_p() {
        assert!(quantile_sorted(&[1.0], 1.5).is_none());
        assert!(quantile_sorted(&[], 0.5).is_none());
    }
}
