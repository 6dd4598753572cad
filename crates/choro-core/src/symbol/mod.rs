//! Per-class visual properties.
//!
//! A [`Symbology`] holds one entry per class for exactly one symbol mode;
//! which mode is picked depends on the dominant geometry family and the
//! per-family mode options.
pub mod color;
pub mod hatch;
pub mod range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::class::ClassSet;
use crate::error::ClassifyError;
use crate::feature::GeometryFamily;
use crate::options::ClassificationOptions;

pub use color::Rgba;
pub use hatch::{HatchOptions, HatchPattern};
pub use range::{size_range, width_range, SizeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointMode {
    #[default]
    Color,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    Color,
    #[default]
    Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonMode {
    #[default]
    Color,
    Hatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointShape {
    #[default]
    Circle,
    Square,
    Diamond,
}

/// Per-class symbol values for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Symbology {
    /// Fill (points, polygons) or stroke (lines) color per class.
    Color { colors: Vec<Rgba> },
    /// Point marker radius per class, one shared fill.
    Size { radii: Vec<f64>, fill: Rgba, shape: PointShape },
    /// Line stroke width per class, one shared stroke color.
    Width { widths: Vec<f64>, stroke: Rgba },
    /// Polygon hatch fill per class.
    Hatch { patterns: Vec<HatchPattern> },
}

/// Symbol of a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Symbol {
    Color { color: Rgba },
    Size { radius: f64, fill: Rgba, shape: PointShape },
    Width { width: f64, stroke: Rgba },
    Hatch { pattern: HatchPattern },
}

impl Symbology {
    /// Build the symbology for `class_count` classes of `family` features.
    pub fn build(
        family: GeometryFamily,
        opts: &ClassificationOptions,
        class_count: usize,
    ) -> Result<Self, ClassifyError> {
        let symbology = match family {
            GeometryFamily::Point if opts.point_mode == PointMode::Size => Symbology::Size {
                radii: opts.point_size.steps(class_count),
                fill: opts.style.fill_color.parse()?,
                shape: opts.point_shape,
            },
            GeometryFamily::Line if opts.line_mode == LineMode::Width => Symbology::Width {
                widths: opts.line_width.steps(class_count),
                stroke: opts.style.color.parse()?,
            },
            GeometryFamily::Polygon if opts.polygon_mode == PolygonMode::Hatch => Symbology::Hatch {
                patterns: hatch::hatch_patterns(&opts.polygon_hatch, class_count),
            },
            _ => Symbology::Color {
                colors: class_colors(&opts.color_ramp, &opts.color_custom, opts.reverse_color_ramp, class_count)?,
            },
        };
        debug!(?family, symbology = ?symbology, "class symbols");
        Ok(symbology)
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Symbology::Color { .. } => "color",
            Symbology::Size { .. } => "size",
            Symbology::Width { .. } => "width",
            Symbology::Hatch { .. } => "hatch",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Symbology::Color { colors } => colors.len(),
            Symbology::Size { radii, .. } => radii.len(),
            Symbology::Width { widths, .. } => widths.len(),
            Symbology::Hatch { patterns } => patterns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbol of class `index`, `None` when out of range.
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        Some(match self {
            Symbology::Color { colors } => Symbol::Color { color: *colors.get(index)? },
            Symbology::Size { radii, fill, shape } => Symbol::Size {
                radius: *radii.get(index)?,
                fill: *fill,
                shape: *shape,
            },
            Symbology::Width { widths, stroke } => Symbol::Width {
                width: *widths.get(index)?,
                stroke: *stroke,
            },
            Symbology::Hatch { patterns } => Symbol::Hatch { pattern: patterns.get(index)?.clone() },
        })
    }

    /// Symbol for a raw value, matched against `classes` without counting.
    pub fn symbol_for_value(&self, classes: &ClassSet, value: f64) -> Option<Symbol> {
        if classes.is_empty() {
            return None;
        }
        self.symbol(classes.index_of(value))
    }
}

/// `class_count` colors from the custom list when it has at least two
/// entries, otherwise from the named ramp; reversed on request.
pub fn class_colors(
    ramp: &str,
    custom: &[String],
    reverse: bool,
    class_count: usize,
) -> Result<Vec<Rgba>, ClassifyError> {
    let stops = match custom.len() {
        0 => color::ramp_stops(ramp)?,
        1 => {
            warn!(color = %custom[0], ramp, "custom colors need at least 2 entries; falling back to the color ramp");
            color::ramp_stops(ramp)?
        }
        _ => custom.iter().map(|c| c.parse()).collect::<Result<Vec<Rgba>, _>>()?,
    };
    let mut colors = color::interpolate(&stops, class_count);
    if reverse {
        colors.reverse();
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ClassificationOptions {
        ClassificationOptions::default()
    }

    #[test]
    fn point_size_mode() {
        let o = ClassificationOptions { point_mode: PointMode::Size, ..opts() };
        let s = Symbology::build(GeometryFamily::Point, &o, 5).unwrap();
        assert_eq!(s.mode(), "size");
        match s.symbol(4).unwrap() {
            Symbol::Size { radius, fill, shape } => {
                assert_eq!(radius, 10.0);
                assert_eq!(fill, Rgba::rgb(255, 165, 0));
                assert_eq!(shape, PointShape::Circle);
            }
            other => panic!("unexpected symbol {other:?}"),
        }
    }

    #[test]
    fn family_defaults() {
        let o = opts();
        assert_eq!(Symbology::build(GeometryFamily::Point, &o, 4).unwrap().mode(), "color");
        assert_eq!(Symbology::build(GeometryFamily::Line, &o, 4).unwrap().mode(), "width");
        assert_eq!(Symbology::build(GeometryFamily::Polygon, &o, 4).unwrap().mode(), "color");
        let hatched = ClassificationOptions { polygon_mode: PolygonMode::Hatch, ..opts() };
        let s = Symbology::build(GeometryFamily::Polygon, &hatched, 4).unwrap();
        assert_eq!(s.mode(), "hatch");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn reversed_ramp() {
        let forward = class_colors("blues", &[], false, 4).unwrap();
        let mut backward = class_colors("blues", &[], true, 4).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn single_custom_color_falls_back() {
        let custom = vec!["#ff0000".to_string()];
        assert_eq!(class_colors("purd", &custom, false, 3).unwrap(), class_colors("purd", &[], false, 3).unwrap());
    }

    #[test]
    fn custom_colors_override_ramp() {
        let custom = vec!["rgba(210,255,178,1)".to_string(), "#fec44fff".into(), "f95f0eff".into()];
        let colors = class_colors("nonexistent", &custom, false, 3).unwrap();
        assert_eq!(colors[0], Rgba::rgb(210, 255, 178));
        assert_eq!(colors[2], Rgba::rgb(0xf9, 0x5f, 0x0e));
    }

    #[test]
    fn bad_colors_abort() {
        assert_eq!(
            class_colors("rainbow", &[], false, 3),
            Err(ClassifyError::UnknownColorRamp("rainbow".into()))
        );
        let custom = vec!["#ff0000".to_string(), "not-a-color".into()];
        assert!(matches!(class_colors("purd", &custom, false, 3), Err(ClassifyError::InvalidColor(_))));
    }

    #[test]
    fn symbol_lookup_by_value() {
        let classes = ClassSet::from_boundaries(&[0.0, 10.0, 20.0]);
        let s = Symbology::Width { widths: vec![1.0, 2.0, 3.0], stroke: Rgba::rgb(0, 0, 0) };
        assert_eq!(s.symbol_for_value(&classes, 15.0), Some(Symbol::Width { width: 2.0, stroke: Rgba::rgb(0, 0, 0) }));
        assert_eq!(s.symbol(3), None);
        assert_eq!(classes.total_count(), 0);
    }
}
