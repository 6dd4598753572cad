//! Class break computation.
//!
//! [`classify`] runs one of the automatic methods over the non-null values;
//! [`compute_breaks`] is the validated entry point the pipeline uses, which
//! also covers manual boundaries.
pub mod equal_interval;
pub mod jenks;
pub mod logarithmic;
pub mod manual;
pub mod quantile;
pub mod stddev;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::class::ClassSet;
use crate::error::ClassifyError;

pub use equal_interval::equal_interval_breaks;
pub use jenks::jenks_breaks;
pub use logarithmic::logarithmic_breaks;
pub use manual::manual_breaks;
pub use quantile::quantile_breaks;
pub use stddev::{stddev_breaks, StdDevBreaks};

/// Largest class count worth drawing; larger requests are clamped.
pub const MAX_CLASSES: usize = 10;

/// Classification method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Method {
    #[default]
    Quantile,
    EqualInterval,
    Jenks,
    Logarithmic,
    StdDeviation,
    Manual,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Quantile => "quantile",
            Method::EqualInterval => "equalinterval",
            Method::Jenks => "jenks",
            Method::Logarithmic => "logarithmic",
            Method::StdDeviation => "stddeviation",
            Method::Manual => "manual",
        }
    }

    /// Whether the requested class count drives the number of classes.
    pub fn uses_class_count(self) -> bool {
        !matches!(self, Method::StdDeviation | Method::Manual)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantile" => Ok(Method::Quantile),
            "equalinterval" | "equal_interval" | "equal-interval" => Ok(Method::EqualInterval),
            "jenks" | "naturalbreaks" | "natural_breaks" => Ok(Method::Jenks),
            "logarithmic" | "log" => Ok(Method::Logarithmic),
            "stddeviation" | "stddev" | "standarddeviation" => Ok(Method::StdDeviation),
            "manual" => Ok(Method::Manual),
            _ => Err(ClassifyError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = ClassifyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Requested classes: a count for the automatic methods, or explicit
/// boundaries for `manual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassSpec {
    Count(usize),
    Boundaries(Vec<f64>),
}

impl Default for ClassSpec {
    fn default() -> Self {
        ClassSpec::Count(5)
    }
}

/// Computed class boundaries, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Breaks {
    pub boundaries: Vec<f64>,
    /// Per-boundary σ multiples; only standard-deviation classification
    /// fills this in.
    pub stddev_labels: Option<Vec<Option<f64>>>,
}

impl Breaks {
    fn plain(boundaries: Vec<f64>) -> Self {
        Self { boundaries, stddev_labels: None }
    }

    pub fn into_class_set(self) -> ClassSet {
        let mut set = ClassSet::from_boundaries(&self.boundaries);
        if let Some(labels) = self.stddev_labels {
            for (class, label) in set.as_mut_slice().iter_mut().zip(labels) {
                class.stddev_label = label;
            }
        }
        set
    }
}

/// Check a requested class count against the number of non-null values.
///
/// Requests above [`MAX_CLASSES`] are first clamped with a warning; the
/// (clamped) count must then satisfy `2 < count < value_count`.
pub fn validate_class_count(requested: usize, value_count: usize) -> Result<usize, ClassifyError> {
    let count = if requested > MAX_CLASSES {
        warn!(requested, "class count above {MAX_CLASSES}, map and legend would be unreadable; using {MAX_CLASSES}");
        MAX_CLASSES
    } else {
        requested
    };
    if count <= 2 || count >= value_count {
        return Err(ClassifyError::ClassCount { requested: count, value_count });
    }
    Ok(count)
}

/// Boundaries for one of the automatic methods.
///
/// `class_count` is taken as already validated. Standard-deviation
/// classification ignores it and returns a data-dependent number of
/// boundaries; use [`stddev_breaks`] directly to also get the σ labels.
pub fn classify(values: &[f64], method: Method, class_count: usize) -> Result<Vec<f64>, ClassifyError> {
    if values.is_empty() {
        return Err(ClassifyError::NoValues);
    }
    let boundaries = match method {
        Method::Quantile => quantile_breaks(values, class_count),
        Method::EqualInterval => equal_interval_breaks(values, class_count),
        Method::Jenks => jenks_breaks(values, class_count),
        Method::Logarithmic => logarithmic_breaks(values, class_count)?,
        Method::StdDeviation => stddev_breaks(values).boundaries,
        Method::Manual => return Err(ClassifyError::ManualWithoutBoundaries(class_count)),
    };
    debug!(method = %method, ?boundaries, "class boundaries");
    Ok(boundaries)
}

/// Validated break computation for a full run.
pub fn compute_breaks(values: &[f64], method: Method, spec: &ClassSpec) -> Result<Breaks, ClassifyError> {
    if values.is_empty() {
        return Err(ClassifyError::NoValues);
    }

    let breaks = match (method, spec) {
        (Method::Manual, ClassSpec::Boundaries(b)) => Breaks::plain(manual_breaks(b)?),
        (Method::Manual, ClassSpec::Count(n)) => {
            return Err(ClassifyError::ManualWithoutBoundaries(*n));
        }
        (m, ClassSpec::Boundaries(_)) => {
            return Err(ClassifyError::BoundariesWithoutManual { method: m.name().to_string() });
        }
        (Method::StdDeviation, ClassSpec::Count(_)) => {
            let sd = stddev_breaks(values);
            debug!(boundaries = ?sd.boundaries, multiples = ?sd.labels, "stddev class boundaries");
            Breaks { boundaries: sd.boundaries, stddev_labels: Some(sd.labels) }
        }
        (m, ClassSpec::Count(n)) => {
            let count = validate_class_count(*n, values.len())?;
            Breaks::plain(classify(values, m, count)?)
        }
    };

    let distinct = count_distinct(&breaks.boundaries);
    if distinct < 2 {
        return Err(ClassifyError::TooFewBoundaries(distinct));
    }
    check_strictly_ascending(&breaks.boundaries)?;
    Ok(breaks)
}

/// Every class needs a range of its own: boundaries must strictly increase.
pub fn check_strictly_ascending(boundaries: &[f64]) -> Result<(), ClassifyError> {
    match boundaries.windows(2).position(|w| w[1] <= w[0]) {
        Some(index) => Err(ClassifyError::DuplicateBoundary {
            index,
            next: index + 1,
            value: boundaries[index + 1],
        }),
        None => Ok(()),
    }
}

fn count_distinct(ascending: &[f64]) -> usize {
    let mut n = 0;
    let mut prev = None;
    for &v in ascending {
        if prev != Some(v) {
            n += 1;
            prev = Some(v);
        }
    }
    n
}
