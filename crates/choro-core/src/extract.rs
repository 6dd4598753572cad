//! Attribute value extraction.
//!
//! Pulls the classification attribute (optionally divided by a second,
//! normalising attribute) out of every feature's property bag. Property
//! names are case-sensitive.
use serde_json::Value;
use tracing::debug;

use crate::error::ClassifyError;
use crate::feature::{Feature, GeometryCounts};

/// Attribute values of one feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedValues {
    /// One entry per input feature, `None` for no-data.
    pub per_feature: Vec<Option<f64>>,
    /// Non-null values in feature order.
    pub values: Vec<f64>,
    pub null_count: usize,
    pub geometry_counts: GeometryCounts,
}

/// Extract `field` from every feature, divided by `normalize_by` when given.
///
/// JSON `null`, an absent key, or a normaliser that is null or zero all
/// produce no-data. Numeric strings are accepted. Any other value is a
/// [`ClassifyError::NonNumeric`]; a field absent from every feature is a
/// [`ClassifyError::MissingField`].
pub fn extract_values(
    features: &[Feature],
    field: &str,
    normalize_by: Option<&str>,
) -> Result<ExtractedValues, ClassifyError> {
    if features.is_empty() {
        return Err(ClassifyError::NoValues);
    }

    let mut per_feature = Vec::with_capacity(features.len());
    let mut values = Vec::with_capacity(features.len());
    let mut geometry_counts = GeometryCounts::default();
    let mut field_seen = false;
    let mut normalizer_seen = false;

    for (index, feature) in features.iter().enumerate() {
        geometry_counts.add(feature.geometry_type());

        let raw = feature.properties.get(field);
        field_seen |= raw.is_some();
        let mut value = match raw {
            Some(v) => numeric(v, index, field)?,
            None => None,
        };

        if let Some(norm_field) = normalize_by {
            let raw_norm = feature.properties.get(norm_field);
            normalizer_seen |= raw_norm.is_some();
            let divisor = match raw_norm {
                Some(v) => numeric(v, index, norm_field)?,
                None => None,
            };
            value = match (value, divisor) {
                (Some(v), Some(d)) if d != 0.0 => Some(v / d),
                (Some(_), _) => {
                    debug!(index, field = norm_field, "normalising value is null or zero, treated as no data");
                    None
                }
                (None, _) => None,
            };
        }

        if let Some(v) = value {
            values.push(v);
        }
        per_feature.push(value);
    }

    if !field_seen {
        return Err(ClassifyError::MissingField(field.to_string()));
    }
    if let Some(norm_field) = normalize_by {
        if !normalizer_seen {
            return Err(ClassifyError::MissingField(norm_field.to_string()));
        }
    }

    let null_count = per_feature.len() - values.len();
    debug!(field, values = values.len(), nulls = null_count, ?geometry_counts, "extracted attribute values");

    Ok(ExtractedValues {
        per_feature,
        values,
        null_count,
        geometry_counts,
    })
}

fn numeric(value: &Value, index: usize, field: &str) -> Result<Option<f64>, ClassifyError> {
    let non_numeric = |found: String| ClassifyError::NonNumeric {
        index,
        field: field.to_string(),
        found,
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| non_numeric(n.to_string())),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(non_numeric(format!("{s:?}"))),
        },
        other => Err(non_numeric(other.to_string())),
    }
}
