//! Legend model: ordered rows of boundary text, counts and symbols.
//!
//! No markup is produced; hosts render rows however they like, or use the
//! plain `text` rendered from [`LegendTemplates`].
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::class::{format_value, ClassSet};
use crate::symbol::{Symbol, Symbology};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    #[default]
    BottomLeft,
    BottomRight,
}

impl LegendPosition {
    /// Parse `name`, falling back to bottom-left with a warning.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(position = name, "invalid legend position, expected topleft, topright, bottomleft or bottomright; using bottomleft");
            LegendPosition::BottomLeft
        })
    }
}

impl FromStr for LegendPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topleft" => Ok(LegendPosition::TopLeft),
            "topright" => Ok(LegendPosition::TopRight),
            "bottomleft" => Ok(LegendPosition::BottomLeft),
            "bottomright" => Ok(LegendPosition::BottomRight),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LegendPosition::TopLeft => "topleft",
            LegendPosition::TopRight => "topright",
            LegendPosition::BottomLeft => "bottomleft",
            LegendPosition::BottomRight => "bottomright",
        })
    }
}

/// Row text templates. `{low}`, `{high}` and `{count}` are substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendTemplates {
    pub lowest: String,
    pub middle: String,
    pub highest: String,
    pub nodata: String,
}

impl Default for LegendTemplates {
    fn default() -> Self {
        Self {
            lowest: "< {high}".to_string(),
            middle: "{low} – {high}".to_string(),
            highest: "{low} <".to_string(),
            nodata: "no data".to_string(),
        }
    }
}

impl LegendTemplates {
    fn template(&self, kind: RowKind) -> &str {
        match kind {
            RowKind::Lowest => &self.lowest,
            RowKind::Middle => &self.middle,
            RowKind::Highest => &self.highest,
            RowKind::NoData => &self.nodata,
        }
    }

    pub fn render(&self, kind: RowKind, low: Option<&str>, high: Option<&str>, count: usize) -> String {
        self.template(kind)
            .replace("{low}", low.unwrap_or(""))
            .replace("{high}", high.unwrap_or(""))
            .replace("{count}", &count.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Lowest,
    Middle,
    Highest,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendRow {
    pub kind: RowKind,
    /// `None` for the no-data row.
    pub class_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev_label: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub position: LegendPosition,
    pub rows: Vec<LegendRow>,
}

/// Everything the legend is built from.
pub struct LegendInput<'a> {
    /// Display classes (after rounding and unit scaling).
    pub classes: &'a ClassSet,
    pub symbology: &'a Symbology,
    pub field: &'a str,
    pub title: &'a str,
    pub position: &'a str,
    pub ascending: bool,
    pub templates: &'a LegendTemplates,
    pub no_data_count: usize,
    pub no_data_ignore: bool,
}

/// `"hidden"` suppresses the title; an empty title uses the field name.
pub fn resolve_title(title: &str, field: &str) -> Option<String> {
    match title {
        "hidden" => None,
        "" => Some(field.to_string()),
        t => Some(t.to_string()),
    }
}

fn sigma_text(multiple: f64) -> String {
    format!("{} σ", format_value(multiple))
}

pub fn build_legend(input: LegendInput<'_>) -> Legend {
    let classes = input.classes.as_slice();
    let last = classes.len().saturating_sub(1);

    let bound_text = |i: usize| {
        let class = &classes[i];
        match class.stddev_label {
            Some(m) => sigma_text(m),
            None => class.label.clone(),
        }
    };

    let mut rows: Vec<LegendRow> = classes
        .iter()
        .enumerate()
        .map(|(i, class)| {
            let kind = if i == 0 {
                RowKind::Lowest
            } else if i == last {
                RowKind::Highest
            } else {
                RowKind::Middle
            };
            let low = (i > 0).then(|| bound_text(i));
            let high = (i < last).then(|| bound_text(i + 1));
            let text = input
                .templates
                .render(kind, low.as_deref(), high.as_deref(), class.feature_count);
            LegendRow {
                kind,
                class_index: Some(i),
                low,
                high,
                count: class.feature_count,
                stddev_label: class.stddev_label,
                symbol: input.symbology.symbol(i),
                text,
            }
        })
        .collect();

    if !input.ascending {
        rows.reverse();
    }

    if input.no_data_count > 0 && !input.no_data_ignore {
        rows.push(LegendRow {
            kind: RowKind::NoData,
            class_index: None,
            low: None,
            high: None,
            count: input.no_data_count,
            stddev_label: None,
            symbol: None,
            text: input.templates.render(RowKind::NoData, None, None, input.no_data_count),
        });
    }

    Legend {
        title: resolve_title(input.title, input.field),
        position: LegendPosition::resolve(input.position),
        rows,
    }
}
