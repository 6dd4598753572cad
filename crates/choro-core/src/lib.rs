//! Attribute classification engine for choropleth and graduated-symbol maps.
//!
//! Pipeline: value extraction → class breaks → post-processing (middle
//! point, rounding) → symbology → class matching → legend model.
//! See [`pipeline::Classifier`] for the orchestrator.

pub mod breaks;
pub mod class;
pub mod error;
pub mod extract;
pub mod feature;
pub mod legend;
pub mod options;
pub mod pipeline;
pub mod postprocess;
pub mod stats;
pub mod symbol;

pub use breaks::{compute_breaks, Breaks, ClassSpec, Method};
pub use class::{match_class, Class, ClassSet};
pub use error::{ClassifyError, RoundingError};
pub use feature::{Feature, FeatureCollection, GeometryFamily, GeometryType};
pub use options::ClassificationOptions;
pub use pipeline::{Classification, Classifier};
