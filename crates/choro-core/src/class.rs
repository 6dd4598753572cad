//! Ordered class set and the value → class matcher.
//!
//! Class `i` covers `[value[i], value[i+1])`; the last class is open-ended
//! above. Matching only tests upper bounds, so class 0 effectively covers
//! everything below `value[1]`.
use serde::{Deserialize, Serialize};

/// One value class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Lower boundary of the class.
    pub value: f64,
    /// Display form of `value`.
    pub label: String,
    /// Number of features matched into this class.
    pub feature_count: usize,
    /// Signed multiple of the standard deviation at the lower boundary.
    /// Only set by standard-deviation classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev_label: Option<f64>,
}

impl Class {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label: format_value(value),
            feature_count: 0,
            stddev_label: None,
        }
    }

    /// Set `value` and refresh the label from it.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.label = format_value(value);
    }
}

/// Ascending sequence of classes produced by one classification run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSet {
    classes: Vec<Class>,
}

impl ClassSet {
    pub fn from_boundaries(boundaries: &[f64]) -> Self {
        Self {
            classes: boundaries.iter().map(|&v| Class::new(v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn as_slice(&self) -> &[Class] {
        &self.classes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Class] {
        &mut self.classes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Class> {
        self.classes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Class> {
        self.classes.get(index)
    }

    /// Boundary values in class order.
    pub fn values(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.value).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.classes.iter().map(|c| c.feature_count).collect()
    }

    pub fn total_count(&self) -> usize {
        self.classes.iter().map(|c| c.feature_count).sum()
    }

    pub fn reset_counts(&mut self) {
        for c in &mut self.classes {
            c.feature_count = 0;
        }
    }

    /// Class index for `value` without touching the counts.
    pub fn index_of(&self, value: f64) -> usize {
        class_index(value, &self.classes)
    }

    /// Class index for `value`; increments that class's feature count.
    pub fn match_value(&mut self, value: f64) -> usize {
        match_class(value, &mut self.classes)
    }
}

impl<'a> IntoIterator for &'a ClassSet {
    type Item = &'a Class;
    type IntoIter = std::slice::Iter<'a, Class>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Index of the class owning `value`: the first `i` for which
/// `value < classes[i + 1].value`, else the last index.
///
/// Panics on an empty class slice.
fn class_index(value: f64, classes: &[Class]) -> usize {
    let last = classes.len() - 1;
    (0..last)
        .find(|&i| value < classes[i + 1].value)
        .unwrap_or(last)
}

/// Match `value` to its class and increment that class's feature count.
///
/// Classes must be non-empty and ascending.
pub fn match_class(value: f64, classes: &mut [Class]) -> usize {
    let index = class_index(value, classes);
    classes[index].feature_count += 1;
    index
}

/// Display text for a boundary value. Integral values print without a
/// fraction; others are cut to 10 decimals with trailing zeros removed.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() || value.fract() == 0.0 {
        return value.to_string();
    }
    let text = format!("{value:.10}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
