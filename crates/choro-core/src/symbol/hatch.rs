//! Hatch-pattern descriptors: fill textures of two alternating strokes,
//! used to tell polygon classes apart without hue.
//!
//! Turning a descriptor into an actual pattern definition (SVG `<pattern>`
//! or similar) is left to a [`PatternMaterializer`].
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::color::Rgba;
use super::range::{size_range, SizeRange};

/// Angle used when a zero increment would make every class look the same.
pub const FALLBACK_ANGLE_STEP: f64 = 45.0;

/// What distinguishes one class's hatch from the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distinction {
    Width,
    Angle,
    Both,
}

impl Distinction {
    fn varies_width(self) -> bool {
        matches!(self, Distinction::Width | Distinction::Both)
    }

    fn varies_angle(self) -> bool {
        matches!(self, Distinction::Angle | Distinction::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HatchOptions {
    /// Ink and gap stroke colors.
    pub colors: [Rgba; 2],
    /// Ink stroke width range.
    pub stroke_width: SizeRange,
    /// Rotation of the first pattern, degrees.
    pub angle_start: f64,
    /// Rotation added per class, degrees.
    pub angle_step: f64,
    pub distinction: Distinction,
}

impl Default for HatchOptions {
    fn default() -> Self {
        Self {
            colors: [Rgba::rgb(0, 0, 0), Rgba::rgb(255, 255, 255)],
            stroke_width: SizeRange::new(1.0, 6.0),
            angle_start: 45.0,
            angle_step: 30.0,
            distinction: Distinction::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatchStroke {
    pub color: Rgba,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatchPattern {
    /// Ink stroke followed by gap stroke.
    pub strokes: [HatchStroke; 2],
    /// Pattern rotation, degrees.
    pub angle: f64,
}

impl HatchPattern {
    /// Tile edge length: the stroke widths laid side by side.
    pub fn size(&self) -> f64 {
        self.strokes.iter().map(|s| s.width).sum()
    }

    /// Fraction of the tile covered by ink.
    pub fn ink_ratio(&self) -> f64 {
        let size = self.size();
        if size > 0.0 {
            self.strokes[0].width / size
        } else {
            0.0
        }
    }
}

/// `class_count` hatch descriptors, index 0 the lightest.
///
/// Ink widths run over `stroke_width` when the distinction varies width
/// (fixed at the range midpoint otherwise); the gap stroke takes up the
/// rest of a constant `min + max` tile. Angles step by `angle_step` when
/// the distinction varies angle. Patterns are generated heaviest first and
/// the list is then reversed.
pub fn hatch_patterns(opts: &HatchOptions, class_count: usize) -> Vec<HatchPattern> {
    let SizeRange { min, max } = opts.stroke_width;
    let tile = min + max;

    let mut angle_step = opts.angle_step;
    if opts.distinction.varies_angle() && angle_step == 0.0 {
        warn!(
            distinction = ?opts.distinction,
            "hatch angle step of 0 makes classes indistinguishable; using {FALLBACK_ANGLE_STEP}°"
        );
        angle_step = FALLBACK_ANGLE_STEP;
    }

    let widths: Vec<f64> = if opts.distinction.varies_width() {
        let mut w = size_range(min, max, class_count);
        w.reverse();
        w
    } else {
        vec![(min + max) / 2.0; class_count]
    };

    let mut patterns: Vec<HatchPattern> = widths
        .into_iter()
        .enumerate()
        .map(|(i, ink)| {
            let angle = if opts.distinction.varies_angle() {
                opts.angle_start + angle_step * i as f64
            } else {
                opts.angle_start
            };
            HatchPattern {
                strokes: [
                    HatchStroke { color: opts.colors[0], width: ink },
                    HatchStroke { color: opts.colors[1], width: tile - ink },
                ],
                angle,
            }
        })
        .collect();
    patterns.reverse();
    patterns
}

/// Turns descriptors into reusable pattern identifiers.
pub trait PatternMaterializer {
    fn materialize(&mut self, pattern: &HatchPattern) -> String;
}

/// Materializer that only hands out sequential identifiers and keeps the
/// registered descriptors, for hosts that build the definitions later.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    prefix: String,
    patterns: Vec<(String, HatchPattern)>,
}

impl PatternRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), patterns: Vec::new() }
    }

    pub fn patterns(&self) -> &[(String, HatchPattern)] {
        &self.patterns
    }
}

impl PatternMaterializer for PatternRegistry {
    fn materialize(&mut self, pattern: &HatchPattern) -> String {
        if let Some((id, _)) = self.patterns.iter().find(|(_, p)| p == pattern) {
            return id.clone();
        }
        let id = format!("{}{}", self.prefix, self.patterns.len());
        self.patterns.push((id.clone(), pattern.clone()));
        id
    }
}

/// Materialize every pattern, in order.
pub fn materialize_all<M: PatternMaterializer + ?Sized>(patterns: &[HatchPattern], materializer: &mut M) -> Vec<String> {
    patterns.iter().map(|p| materializer.materialize(p)).collect()
}
