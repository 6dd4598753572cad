//! Classification orchestrator: runs every stage in order and assembles
//! the result.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::breaks::{check_strictly_ascending, compute_breaks, Method};
use crate::class::ClassSet;
use crate::error::ClassifyError;
use crate::extract::extract_values;
use crate::feature::{Feature, GeometryFamily};
use crate::legend::{build_legend, Legend, LegendInput};
use crate::options::ClassificationOptions;
use crate::postprocess::{apply_middle_point, effective_rounding, round_classes, unit_modify};
use crate::symbol::hatch::{materialize_all, PatternMaterializer, PatternRegistry};
use crate::symbol::{Symbol, Symbology};

// ── Public structs ────────────────────────────────────────────────────────────

/// Full output of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub field: String,
    pub method: Method,
    /// Classes with their feature counts, as used for matching.
    pub classes: ClassSet,
    /// Classes as shown in the legend (unit modifier applied). Counts are
    /// the same as in `classes`.
    pub display_classes: ClassSet,
    /// Dominant geometry family; selects the symbol mode.
    pub family: GeometryFamily,
    pub symbology: Symbology,
    /// Pattern identifier per class in hatch mode, empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hatch_ids: Vec<String>,
    /// Class index per input feature, `None` for no-data.
    pub assignments: Vec<Option<usize>>,
    pub no_data_count: usize,
    pub legend: Legend,
    /// Post-processing steps that were skipped, with the reason.
    pub diagnostics: Vec<String>,
}

impl Classification {
    /// Symbol of feature `index`; `None` for no-data or out of range.
    pub fn symbol_for_feature(&self, index: usize) -> Option<Symbol> {
        let class = (*self.assignments.get(index)?)?;
        self.symbology.symbol(class)
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

pub struct Classifier {
    options: ClassificationOptions,
}

impl Classifier {
    pub fn new(options: ClassificationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClassificationOptions {
        &self.options
    }

    /// Run the full classification.
    ///
    /// Stage order:
    ///   1. Value extraction
    ///   2. Class breaks
    ///   3. Middle point, rounding
    ///   4. Symbology for the dominant geometry family
    ///   5. Styling pass (class matching, counts)
    ///   6. Display unit scaling, legend
    ///
    /// Failed rounding or unit scaling is reported in `diagnostics` and the
    /// run continues with the unmodified values; anything else aborts.
    ///
    /// Hatch patterns get sequential `hatch-pattern-N` identifiers; use
    /// [`Classifier::run_with_materializer`] to register them elsewhere.
    pub fn run(&self, features: &[Feature]) -> Result<Classification, ClassifyError> {
        self.run_with_materializer(features, &mut PatternRegistry::new("hatch-pattern-"))
    }

    /// [`Classifier::run`], handing hatch descriptors to `materializer`.
    pub fn run_with_materializer(
        &self,
        features: &[Feature],
        materializer: &mut dyn PatternMaterializer,
    ) -> Result<Classification, ClassifyError> {
        let opts = &self.options;
        let mut diagnostics = Vec::new();

        // ── 1. Value extraction ─────────────────────────────────────────────
        let extracted = extract_values(features, &opts.field, opts.normalize_by.as_deref())?;
        if extracted.values.is_empty() {
            return Err(ClassifyError::NoValues);
        }
        let family = extracted.geometry_counts.dominant_family();

        // ── 2. Class breaks ─────────────────────────────────────────────────
        let mut classes = compute_breaks(&extracted.values, opts.mode, &opts.classes)?.into_class_set();

        // ── 3. Middle point, rounding ───────────────────────────────────────
        if let Some(mid) = opts.middle_point_value {
            apply_middle_point(&mut classes, mid)?;
        }
        if let Some(n) = effective_rounding(opts.class_rounding, opts.mode) {
            if let Err(e) = round_classes(&mut classes, n) {
                error!(rounding = n, "{e}");
                diagnostics.push(e.to_string());
            }
        }
        check_strictly_ascending(&classes.values())?;

        // ── 4. Symbology ────────────────────────────────────────────────────
        let symbology = Symbology::build(family, opts, classes.len())?;
        let hatch_ids = match &symbology {
            Symbology::Hatch { patterns } => materialize_all(patterns, materializer),
            _ => Vec::new(),
        };

        // ── 5. Styling pass ─────────────────────────────────────────────────
        let assignments: Vec<Option<usize>> = extracted
            .per_feature
            .iter()
            .map(|value| value.map(|v| classes.match_value(v)))
            .collect();

        // ── 6. Display values, legend ───────────────────────────────────────
        let mut display_classes = classes.clone();
        if let Some(modifier) = opts.unit_modifier {
            if let Err(e) = unit_modify(&mut display_classes, modifier) {
                warn!("unit modifier skipped: {e}");
                diagnostics.push(e.to_string());
                display_classes = classes.clone();
            }
        }

        let legend = build_legend(LegendInput {
            classes: &display_classes,
            symbology: &symbology,
            field: &opts.field,
            title: &opts.legend_title,
            position: &opts.legend_position,
            ascending: opts.legend_ascending,
            templates: &opts.legend_templates,
            no_data_count: extracted.null_count,
            no_data_ignore: opts.no_data_ignore,
        });

        info!(
            field = %opts.field,
            method = %opts.mode,
            classes = classes.len(),
            features = features.len(),
            no_data = extracted.null_count,
            mode = symbology.mode(),
            "classification finished"
        );

        Ok(Classification {
            field: opts.field.clone(),
            method: opts.mode,
            classes,
            display_classes,
            family,
            symbology,
            hatch_ids,
            assignments,
            no_data_count: extracted.null_count,
            legend,
            diagnostics,
        })
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::ClassSpec;
    use crate::feature::GeometryType;
    use crate::legend::RowKind;
    use crate::postprocess::{UnitAction, UnitModifier};
    use crate::symbol::PolygonMode;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde_json::{json, Map, Value};

    fn feature(kind: GeometryType, value: Value) -> Feature {
        let mut props = Map::new();
        props.insert("v".to_string(), value);
        Feature::new(kind, props)
    }

    fn polygons(values: &[f64]) -> Vec<Feature> {
        values.iter().map(|&v| feature(GeometryType::Polygon, json!(v))).collect()
    }

    fn options(mode: Method, classes: ClassSpec) -> ClassificationOptions {
        ClassificationOptions {
            field: "v".to_string(),
            mode,
            classes,
            ..ClassificationOptions::default()
        }
    }

    fn random_features(seed: u64, n: usize) -> Vec<Feature> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let value = if rng.gen_bool(0.1) { Value::Null } else { json!(rng.gen_range(1.0..5000.0)) };
                feature(GeometryType::MultiPolygon, value)
            })
            .collect()
    }

    #[test]
    fn rerun_is_idempotent() {
        let features = random_features(42, 200);
        for mode in [Method::Quantile, Method::EqualInterval, Method::Jenks, Method::Logarithmic, Method::StdDeviation] {
            let classifier = Classifier::new(options(mode, ClassSpec::Count(6)));
            let first = classifier.run(&features).unwrap();
            let second = classifier.run(&features).unwrap();
            assert_eq!(first, second, "{mode} differs between runs");
        }
    }

    #[test]
    fn every_feature_counted_once() {
        let features = random_features(7, 150);
        let result = Classifier::new(options(Method::Jenks, ClassSpec::Count(5))).run(&features).unwrap();
        assert_eq!(result.classes.total_count() + result.no_data_count, features.len());
        assert_eq!(result.display_classes.counts(), result.classes.counts());
        let nulls = result.assignments.iter().filter(|a| a.is_none()).count();
        assert_eq!(nulls, result.no_data_count);
        let last = result.legend.rows.last().unwrap();
        assert_eq!(last.kind, RowKind::NoData);
    }

    #[test]
    fn bad_class_counts_abort() {
        let features = polygons(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        for n in [1, 2, 5, 9] {
            let err = Classifier::new(options(Method::Quantile, ClassSpec::Count(n))).run(&features).unwrap_err();
            assert!(matches!(err, ClassifyError::ClassCount { requested, value_count: 5 } if requested == n));
        }
    }

    #[test]
    fn logarithmic_rejects_non_positive() {
        let features = polygons(&[0.0, 10.0, 100.0, 1000.0, 10000.0]);
        let err = Classifier::new(options(Method::Logarithmic, ClassSpec::Count(3))).run(&features).unwrap_err();
        assert_eq!(err, ClassifyError::NonPositiveForLog(0.0));
    }

    #[test]
    fn logarithmic_defaults_to_two_decimals() {
        let features = polygons(&[1.0, 3.0, 10.0, 30.0, 100.0, 300.0, 1000.0]);
        let result = Classifier::new(options(Method::Logarithmic, ClassSpec::Count(3))).run(&features).unwrap();
        let values = result.classes.values();
        assert_eq!(values[0], 1.0);
        assert_relative_eq!(values[1], 10.0, epsilon = 1e-9);
        assert_relative_eq!(values[2], 100.0, epsilon = 1e-9);
        assert_eq!(result.classes.get(1).unwrap().label, "10.00");
    }

    #[test]
    fn manual_boundaries_drive_class_count() {
        let features = polygons(&[5.0, 15.0, 25.0, 35.0, 45.0, 55.0]);
        let result = Classifier::new(options(Method::Manual, ClassSpec::Boundaries(vec![0.0, 20.0, 40.0, 50.0])))
            .run(&features)
            .unwrap();
        assert_eq!(result.classes.counts(), vec![2, 2, 1, 1]);
        assert_eq!(result.symbology.len(), 4);
    }

    #[test]
    fn stddev_labels_reach_the_legend() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let opts = ClassificationOptions { legend_ascending: true, ..options(Method::StdDeviation, ClassSpec::Count(5)) };
        let result = Classifier::new(opts).run(&polygons(&values)).unwrap();
        assert!(result.classes.len() >= 3);
        assert!(result.legend.rows[0].high.as_deref().unwrap().ends_with('σ'));
        assert_eq!(result.legend.rows[1].stddev_label, result.classes.get(1).unwrap().stddev_label);
    }

    #[test]
    fn failed_rounding_is_reported_not_fatal() {
        let features = polygons(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let opts = ClassificationOptions { class_rounding: Some(-3), ..options(Method::EqualInterval, ClassSpec::Count(4)) };
        let result = Classifier::new(opts).run(&features).unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.classes.values(), vec![1.0, 2.75, 4.5, 6.25]);
    }

    #[test]
    fn unit_modifier_only_touches_display() {
        let features = polygons(&[1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0]);
        let opts = ClassificationOptions {
            unit_modifier: Some(UnitModifier { action: UnitAction::Divide, by: 1000.0 }),
            legend_ascending: true,
            ..options(Method::EqualInterval, ClassSpec::Count(5))
        };
        let result = Classifier::new(opts).run(&features).unwrap();
        assert_eq!(result.classes.get(1).unwrap().value, 2000.0);
        assert_eq!(result.display_classes.get(1).unwrap().value, 2.0);
        assert_eq!(result.legend.rows[0].text, "< 2");

        let bad = ClassificationOptions {
            unit_modifier: Some(UnitModifier { action: UnitAction::Divide, by: 0.0 }),
            ..options(Method::EqualInterval, ClassSpec::Count(5))
        };
        let result = Classifier::new(bad).run(&features).unwrap();
        assert_eq!(result.display_classes, result.classes);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn dominant_family_selects_symbols() {
        let mut features: Vec<Feature> = (1..=6).map(|i| feature(GeometryType::LineString, json!(i))).collect();
        features.push(feature(GeometryType::Point, json!(7)));
        let result = Classifier::new(options(Method::Quantile, ClassSpec::Count(3))).run(&features).unwrap();
        assert_eq!(result.family, GeometryFamily::Line);
        assert!(matches!(result.symbol_for_feature(0), Some(Symbol::Width { width, .. }) if width == 3.0));
    }

    #[test]
    fn middle_point_replaces_center_boundary() {
        let values: Vec<f64> = (-50..=50).map(f64::from).collect();
        let opts = ClassificationOptions { middle_point_value: Some(0.0), ..options(Method::EqualInterval, ClassSpec::Count(4)) };
        let result = Classifier::new(opts).run(&polygons(&values)).unwrap();
        assert_eq!(result.classes.get(2).unwrap().value, 0.0);

        let opts = ClassificationOptions { middle_point_value: Some(40.0), ..options(Method::EqualInterval, ClassSpec::Count(4)) };
        assert!(matches!(Classifier::new(opts).run(&polygons(&values)), Err(ClassifyError::MiddlePoint { .. })));
    }

    #[test]
    fn tied_values_abort_instead_of_empty_classes() {
        let mut values = vec![1.0; 8];
        values.extend([2.0, 3.0]);
        let err = Classifier::new(options(Method::Quantile, ClassSpec::Count(5))).run(&polygons(&values)).unwrap_err();
        assert!(matches!(err, ClassifyError::DuplicateBoundary { .. }), "{err}");
    }

    #[test]
    fn oversized_class_count_is_clamped() {
        let values: Vec<f64> = (1..=12).map(f64::from).collect();
        let result = Classifier::new(options(Method::EqualInterval, ClassSpec::Count(14))).run(&polygons(&values)).unwrap();
        assert_eq!(result.classes.len(), 10);
    }

    #[test]
    fn point_family_wins_over_single_polygon_type() {
        let mut features = Vec::new();
        for (i, kind) in [
            GeometryType::Point,
            GeometryType::Point,
            GeometryType::MultiPoint,
            GeometryType::MultiPoint,
            GeometryType::Polygon,
            GeometryType::Polygon,
            GeometryType::Polygon,
        ]
        .into_iter()
        .enumerate()
        {
            features.push(feature(kind, json!(i)));
        }
        let result = Classifier::new(options(Method::Quantile, ClassSpec::Count(3))).run(&features).unwrap();
        assert_eq!(result.family, GeometryFamily::Point);
    }

    #[test]
    fn out_of_range_rounding_is_reported() {
        let opts = ClassificationOptions { class_rounding: Some(i32::MIN), ..options(Method::EqualInterval, ClassSpec::Count(4)) };
        let result = Classifier::new(opts).run(&polygons(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.classes.values()[0], 1.0);
    }

    #[test]
    fn hatch_mode_materializes_pattern_ids() {
        let values: Vec<f64> = (1..=8).map(f64::from).collect();
        let opts = ClassificationOptions { polygon_mode: PolygonMode::Hatch, ..options(Method::Quantile, ClassSpec::Count(4)) };
        let classifier = Classifier::new(opts);

        let result = classifier.run(&polygons(&values)).unwrap();
        assert_eq!(result.hatch_ids, vec!["hatch-pattern-0", "hatch-pattern-1", "hatch-pattern-2", "hatch-pattern-3"]);

        let mut registry = PatternRegistry::new("fill-");
        let result = classifier.run_with_materializer(&polygons(&values), &mut registry).unwrap();
        assert_eq!(result.hatch_ids[3], "fill-3");
        assert_eq!(registry.patterns().len(), 4);
        assert_eq!(&registry.patterns()[3].1, match &result.symbology {
            Symbology::Hatch { patterns } => &patterns[3],
            other => panic!("unexpected symbology {other:?}"),
        });

        let colored = Classifier::new(options(Method::Quantile, ClassSpec::Count(4))).run(&polygons(&values)).unwrap();
        assert!(colored.hatch_ids.is_empty());
    }

    #[test]
    fn all_null_values() {
        let features = vec![feature(GeometryType::Point, Value::Null); 4];
        assert_eq!(
            Classifier::new(options(Method::Quantile, ClassSpec::Count(3))).run(&features),
            Err(ClassifyError::NoValues)
        );
    }
}
