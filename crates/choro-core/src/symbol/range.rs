//! Linear per-class symbol magnitudes (point radius, line width).
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` magnitude range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn steps(&self, class_count: usize) -> Vec<f64> {
        size_range(self.min, self.max, class_count)
    }
}

/// `class_count` values from `min` to `max` inclusive, evenly stepped by
/// `(max − min) / (class_count − 1)`. A single class gets `min`.
pub fn size_range(min: f64, max: f64, class_count: usize) -> Vec<f64> {
    match class_count {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n).map(|i| min + step * i as f64).collect()
        }
    }
}

/// Same contract as [`size_range`], for stroke widths.
pub fn width_range(min: f64, max: f64, class_count: usize) -> Vec<f64> {
    size_range(min, max, class_count)
}
