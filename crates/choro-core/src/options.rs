//! Run configuration.
//!
//! Every field has a default, so a partial (or empty) JSON object is a
//! valid configuration. Keys are camelCase.
use serde::{Deserialize, Serialize};

use crate::breaks::{ClassSpec, Method};
use crate::legend::LegendTemplates;
use crate::postprocess::UnitModifier;
use crate::symbol::{HatchOptions, LineMode, PointMode, PointShape, PolygonMode, SizeRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassificationOptions {
    /// Attribute to classify. Case-sensitive.
    pub field: String,
    /// Attribute to divide `field` by.
    pub normalize_by: Option<String>,
    /// Classification method.
    pub mode: Method,
    /// Class count, or explicit boundaries for `manual`.
    pub classes: ClassSpec,

    pub point_mode: PointMode,
    /// Marker radius range for `pointMode: size`.
    pub point_size: SizeRange,
    pub point_shape: PointShape,
    pub line_mode: LineMode,
    /// Stroke width range for `lineMode: width`.
    pub line_width: SizeRange,
    pub polygon_mode: PolygonMode,
    pub polygon_hatch: HatchOptions,

    /// ColorBrewer ramp name.
    pub color_ramp: String,
    /// At least two colors; overrides `colorRamp`.
    pub color_custom: Vec<String>,
    pub reverse_color_ramp: bool,

    /// Drop no-data features from the legend.
    pub no_data_ignore: bool,
    /// Decimals (≥ 0) or power-of-ten snapping (< 0).
    pub class_rounding: Option<i32>,
    /// Display-only boundary scaling.
    pub unit_modifier: Option<UnitModifier>,
    /// Boundary between the two middle classes (even class counts only).
    pub middle_point_value: Option<f64>,

    /// Legend title; empty uses the field name, `hidden` suppresses it.
    pub legend_title: String,
    pub legend_ascending: bool,
    pub legend_position: String,
    pub legend_templates: LegendTemplates,

    pub style: BaseStyle,
}

impl Default for ClassificationOptions {
    fn default() -> Self {
        Self {
            field: String::new(),
            normalize_by: None,
            mode: Method::Quantile,
            classes: ClassSpec::default(),
            point_mode: PointMode::Color,
            point_size: SizeRange::new(2.0, 10.0),
            point_shape: PointShape::Circle,
            line_mode: LineMode::Width,
            line_width: SizeRange::new(3.0, 15.0),
            polygon_mode: PolygonMode::Color,
            polygon_hatch: HatchOptions::default(),
            color_ramp: "purd".to_string(),
            color_custom: Vec::new(),
            reverse_color_ramp: false,
            no_data_ignore: false,
            class_rounding: None,
            unit_modifier: None,
            middle_point_value: None,
            legend_title: String::new(),
            legend_ascending: false,
            legend_position: "bottomleft".to_string(),
            legend_templates: LegendTemplates::default(),
            style: BaseStyle::default(),
        }
    }
}

/// Fixed style used by the size and width modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseStyle {
    /// Point fill in size mode.
    pub fill_color: String,
    /// Line stroke in width mode.
    pub color: String,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            fill_color: "orange".to_string(),
            color: "#3388ff".to_string(),
        }
    }
}
