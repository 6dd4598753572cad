//! Colors and color ramps.
//!
//! Named ramps are the ColorBrewer sequential (9-class) and diverging
//! (11-class) schemes. A ramp is sampled at `n` evenly spaced positions
//! with linear RGB interpolation between its stops.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClassifyError;

/// 8-bit RGB color with alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgba {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", (self.a * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (the `#` is optional),
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` and a handful of CSS names.
impl FromStr for Rgba {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let invalid = || ClassifyError::InvalidColor(s.to_string());

        if let Some(c) = named(&text) {
            return Ok(c);
        }
        if let Some(args) = text.strip_prefix("rgba(").or_else(|| text.strip_prefix("rgb(")) {
            let args = args.strip_suffix(')').ok_or_else(invalid)?;
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            if parts.len() != 3 && parts.len() != 4 {
                return Err(invalid());
            }
            let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
            let alpha = match parts.get(3) {
                Some(p) => p.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a)).ok_or_else(invalid)?,
                None => 1.0,
            };
            return Ok(Rgba {
                r: channel(parts[0])?,
                g: channel(parts[1])?,
                b: channel(parts[2])?,
                a: alpha,
            });
        }

        let hex = text.strip_prefix('#').unwrap_or(&text);
        parse_hex(hex).ok_or_else(invalid)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let c = match hex.len() {
        3 => Rgba::rgb(digit(0)?, digit(1)?, digit(2)?),
        4 => Rgba { a: digit(3)? as f64 / 255.0, ..Rgba::rgb(digit(0)?, digit(1)?, digit(2)?) },
        6 => Rgba::rgb(pair(0)?, pair(2)?, pair(4)?),
        8 => Rgba { a: pair(6)? as f64 / 255.0, ..Rgba::rgb(pair(0)?, pair(2)?, pair(4)?) },
        _ => return None,
    };
    Some(c)
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "transparent" => Rgba { r: 0, g: 0, b: 0, a: 0.0 },
        _ => return None,
    };
    Some(c)
}

// ── ColorBrewer stops ─────────────────────────────────────────────────────────

const RAMPS: &[(&str, &[&str])] = &[
    ("purd", &["#f7f4f9", "#e7e1ef", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#980043", "#67001f"]),
    ("orrd", &["#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#b30000", "#7f0000"]),
    ("ylorrd", &["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026", "#800026"]),
    ("ylgn", &["#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#006837", "#004529"]),
    ("ylgnbu", &["#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494", "#081d58"]),
    ("blues", &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b"]),
    ("greens", &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c", "#00441b"]),
    ("reds", &["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15", "#67000d"]),
    ("greys", &["#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525", "#000000"]),
    ("purples", &["#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f", "#3f007d"]),
    ("oranges", &["#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603", "#7f2704"]),
    ("rdylgn", &["#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63", "#1a9850", "#006837"]),
    ("rdbu", &["#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061"]),
    ("spectral", &["#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2"]),
];

/// Names of the built-in ramps.
pub fn ramp_names() -> impl Iterator<Item = &'static str> {
    RAMPS.iter().map(|(name, _)| *name)
}

/// Stops of a named ramp (case-insensitive).
pub fn ramp_stops(name: &str) -> Result<Vec<Rgba>, ClassifyError> {
    let key = name.trim().to_ascii_lowercase();
    let (_, stops) = RAMPS
        .iter()
        .find(|(n, _)| *n == key)
        .ok_or_else(|| ClassifyError::UnknownColorRamp(name.to_string()))?;
    stops.iter().map(|s| s.parse()).collect()
}

/// `n` colors evenly spaced along `stops`, first stop to last stop.
pub fn interpolate(stops: &[Rgba], n: usize) -> Vec<Rgba> {
    match (stops.len(), n) {
        (0, _) | (_, 0) => Vec::new(),
        (1, _) => vec![stops[0]; n],
        (_, 1) => vec![stops[0]],
        _ => {
            let segments = (stops.len() - 1) as f64;
            (0..n)
                .map(|i| {
                    let pos = i as f64 / (n - 1) as f64 * segments;
                    let k = (pos.floor() as usize).min(stops.len() - 2);
                    stops[k].lerp(stops[k + 1], pos - k as f64)
                })
                .collect()
        }
    }
}
