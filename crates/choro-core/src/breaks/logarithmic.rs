//! Logarithmic classification: boundaries in constant ratio.
use crate::error::ClassifyError;
use crate::stats::extent;

/// Decimals applied to logarithmic boundaries unless the caller chose a
/// rounding explicitly.
pub const DEFAULT_ROUNDING: i32 = 2;

/// `boundary[0]` = min, `boundary[i] = boundary[i−1] · factor` with
///   factor = exp((ln max − ln min) / class_count)
///
/// Every value must be strictly positive; the first offending value is
/// reported otherwise.
pub fn logarithmic_breaks(values: &[f64], class_count: usize) -> Result<Vec<f64>, ClassifyError> {
    if let Some(&bad) = values.iter().find(|&&v| v <= 0.0) {
        return Err(ClassifyError::NonPositiveForLog(bad));
    }
    let Some((min, max)) = extent(values) else {
        return Err(ClassifyError::NoValues);
    };
    let factor = ((max.ln() - min.ln()) / class_count as f64).exp();

    let mut boundaries = Vec::with_capacity(class_count);
    let mut current = min;
    for _ in 0..class_count {
        boundaries.push(current);
        current *= factor;
    }
    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn decades() {
        let values = [1.0, 4.0, 10.0, 55.0, 300.0, 1000.0];
        let b = logarithmic_breaks(&values, 3).unwrap();
        assert_eq!(b.len(), 3);
        assert_relative_eq!(b[0], 1.0);
        assert_relative_eq!(b[1], 10.0, max_relative = 1e-12);
        assert_relative_eq!(b[2], 100.0, max_relative = 1e-12);
    }

    #[test]
    fn constant_ratio() {
        let values = [2.0, 3.0, 50.0, 512.0];
        let b = logarithmic_breaks(&values, 4).unwrap();
        let r = b[1] / b[0];
        for w in b.windows(2) {
            assert_relative_eq!(w[1] / w[0], r, max_relative = 1e-12);
        }
    }

    #[test]
    fn non_positive_values_abort() {
        assert_eq!(
            logarithmic_breaks(&[5.0, 0.0, 9.0], 3),
            Err(ClassifyError::NonPositiveForLog(0.0))
        );
        assert_eq!(
            logarithmic_breaks(&[5.0, -2.0, 9.0], 3),
            Err(ClassifyError::NonPositiveForLog(-2.0))
        );
    }
}
