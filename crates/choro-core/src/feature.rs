//! GeoJSON-shaped feature input.
//!
//! Only the geometry type tag and the property bag are read; coordinates
//! are ignored.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    #[serde(other)]
    Unknown,
}

impl GeometryType {
    pub fn family(self) -> GeometryFamily {
        match self {
            GeometryType::Point | GeometryType::MultiPoint => GeometryFamily::Point,
            GeometryType::LineString | GeometryType::MultiLineString => GeometryFamily::Line,
            GeometryType::Polygon | GeometryType::MultiPolygon | GeometryType::Unknown => {
                GeometryFamily::Polygon
            }
        }
    }
}

/// Symbolisation family: selects the symbol mode and legend symbol kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFamily {
    Point,
    Line,
    Polygon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub properties: Map<String, Value>,
}

fn null_as_empty_map<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> std::result::Result<Map<String, Value>, D::Error> {
    let m: Option<Map<String, Value>> = Option::deserialize(d)?;
    Ok(m.unwrap_or_default())
}

impl Feature {
    pub fn new(kind: GeometryType, properties: Map<String, Value>) -> Self {
        Self { geometry: Some(Geometry { kind }), properties }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.as_ref().map_or(GeometryType::Unknown, |g| g.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Per-type feature tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryCounts {
    pub point: usize,
    pub multi_point: usize,
    pub line_string: usize,
    pub multi_line_string: usize,
    pub polygon: usize,
    pub multi_polygon: usize,
    pub unknown: usize,
}

impl GeometryCounts {
    pub fn add(&mut self, kind: GeometryType) {
        match kind {
            GeometryType::Point => self.point += 1,
            GeometryType::MultiPoint => self.multi_point += 1,
            GeometryType::LineString => self.line_string += 1,
            GeometryType::MultiLineString => self.multi_line_string += 1,
            GeometryType::Polygon => self.polygon += 1,
            GeometryType::MultiPolygon => self.multi_polygon += 1,
            GeometryType::Unknown => self.unknown += 1,
        }
    }

    /// Feature count per family, unknown geometries excluded.
    pub fn family_counts(&self) -> [(GeometryFamily, usize); 3] {
        [
            (GeometryFamily::Point, self.point + self.multi_point),
            (GeometryFamily::Line, self.line_string + self.multi_line_string),
            (GeometryFamily::Polygon, self.polygon + self.multi_polygon),
        ]
    }

    /// Family with the most features. Ties go Point, then Line, then
    /// Polygon; with no known geometry at all, Polygon.
    pub fn dominant_family(&self) -> GeometryFamily {
        let mut best = (GeometryFamily::Polygon, 0);
        for (family, count) in self.family_counts() {
            if count > best.1 {
                best = (family, count);
            }
        }
        best.0
    }
}
