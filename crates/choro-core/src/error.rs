//! Error taxonomy for a classification run.
//!
//! Configuration and data errors abort the whole run. [`RoundingError`]s
//! abort only the rounding step; the pipeline keeps the unrounded classes.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    // ── Configuration ────────────────────────────────────────────────────────
    #[error("class count out of range (must be: 2 < x < {value_count} (featurecount)), got {requested}")]
    ClassCount { requested: usize, value_count: usize },

    #[error("unknown classification method {0:?} (choose from quantile, equalinterval, jenks, logarithmic, stddeviation, manual)")]
    UnknownMethod(String),

    #[error("method {method} does not accept an explicit boundary array; use a class count or method \"manual\"")]
    BoundariesWithoutManual { method: String },

    #[error("method \"manual\" requires an explicit boundary array, got a class count of {0}")]
    ManualWithoutBoundaries(usize),

    #[error("invalid manual class boundaries: {0}")]
    ManualBoundaries(String),

    #[error("unknown color ramp {0:?} (ramps follow ColorBrewer names, e.g. \"purd\", \"ylgnbu\")")]
    UnknownColorRamp(String),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("invalid unit modifier: {0}")]
    UnitModifier(String),

    #[error("middle point value {value} must lie within the middle classes range ({low} – {high})")]
    MiddlePoint { value: f64, low: f64, high: f64 },

    // ── Data ─────────────────────────────────────────────────────────────────
    #[error("attribute field {0:?} does not exist in any feature (field names are case-sensitive)")]
    MissingField(String),

    #[error("feature {index}: attribute {field:?} is not numeric ({found})")]
    NonNumeric { index: usize, field: String, found: String },

    #[error("logarithmic classification requires positive values, found {0}")]
    NonPositiveForLog(f64),

    #[error("no non-null values to classify")]
    NoValues,

    #[error("classification produced {0} distinct boundaries, at least 2 are required")]
    TooFewBoundaries(usize),

    #[error("class boundaries {index} and {next} are both {value}; the data has too many tied values for this class count, try fewer classes or another method")]
    DuplicateBoundary { index: usize, next: usize, value: f64 },

    // ── Post-processing ──────────────────────────────────────────────────────
    #[error(transparent)]
    Rounding(#[from] RoundingError),
}

/// Rounding failures. The classes passed to the rounding step are left
/// untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoundingError {
    #[error("rounding to the nearest {granularity} ({n}) exceeds the highest class boundary value ({max}); adjust the rounding to {suggested} (optimal)")]
    GranularityAboveMax { n: i32, granularity: f64, max: f64, suggested: i32 },

    #[error("rounding to the nearest {granularity} collapses the two lowest class boundaries ({low}, {next}) into {rounded}; adjust the rounding to {suggested}")]
    LowestCollapse { granularity: f64, low: f64, next: f64, rounded: f64, suggested: i32 },

    #[error("rounding to the nearest {granularity} exceeds the lowest class threshold ({threshold}); adjust the rounding to {suggested}")]
    GranularityAboveLowest { granularity: f64, threshold: f64, suggested: i32 },

    #[error("rounding to the nearest {granularity} merges class boundaries {index} and {next} ({rounded}); adjust the rounding to {suggested}")]
    SnapCollision { granularity: f64, index: usize, next: usize, rounded: f64, suggested: i32 },

    #[error("rounding setting {n} is out of range ({min} to {max})")]
    MagnitudeOutOfRange { n: i32, min: i32, max: i32 },

    #[error("rounding to {decimals} decimals merges class boundaries {index} and {next} ({rounded}); use more decimals")]
    DecimalCollision { decimals: u32, index: usize, next: usize, rounded: f64 },
}
