//! Caller-supplied class boundaries.
use tracing::debug;

use crate::error::ClassifyError;

/// Validate and sort explicit boundaries. At least two finite, distinct
/// values are required.
pub fn manual_breaks(boundaries: &[f64]) -> Result<Vec<f64>, ClassifyError> {
    if boundaries.len() < 2 {
        return Err(ClassifyError::ManualBoundaries(format!(
            "at least 2 boundaries are required, got {}",
            boundaries.len()
        )));
    }
    if let Some(bad) = boundaries.iter().find(|v| !v.is_finite()) {
        return Err(ClassifyError::ManualBoundaries(format!("non-finite boundary {bad}")));
    }

    let mut sorted = boundaries.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(ClassifyError::ManualBoundaries(format!("duplicate boundary {}", w[0])));
    }
    if sorted.as_slice() != boundaries {
        debug!(?sorted, "manual boundaries sorted ascending");
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_unsorted_input() {
        assert_eq!(manual_breaks(&[50.0, 0.0, 10.0]).unwrap(), vec![0.0, 10.0, 50.0]);
    }

    #[test]
    fn rejects_short_duplicate_and_nan() {
        assert!(manual_breaks(&[1.0]).is_err());
        assert!(manual_breaks(&[1.0, 2.0, 1.0]).is_err());
        assert!(manual_breaks(&[1.0, f64::NAN]).is_err());
    }
}
