//! Browser binding: classify a GeoJSON feature collection from JSON text.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use choro_core::symbol::size_range as core_size_range;
use choro_core::{Classification, ClassificationOptions, Classifier, Feature, FeatureCollection};

#[wasm_bindgen(start)]
pub fn init() {}

/// Either a full FeatureCollection or a bare feature array.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureInput {
    Collection(FeatureCollection),
    Features(Vec<Feature>),
}

impl FeatureInput {
    fn into_features(self) -> Vec<Feature> {
        match self {
            FeatureInput::Collection(c) => c.features,
            FeatureInput::Features(f) => f,
        }
    }
}

fn classify_json(features_json: &str, options_json: &str) -> Result<Classification> {
    let features = serde_json::from_str::<FeatureInput>(features_json)
        .context("invalid features: expected a GeoJSON FeatureCollection or feature array")?
        .into_features();
    let options: ClassificationOptions = if options_json.trim().is_empty() {
        ClassificationOptions::default()
    } else {
        serde_json::from_str(options_json).context("invalid options")?
    };
    let result = Classifier::new(options).run(&features)?;
    Ok(result)
}

fn to_js_error(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

/// Classify features and return the full result (classes, symbols,
/// per-feature assignments, legend) as a plain JS object.
#[wasm_bindgen]
pub fn classify(features_json: &str, options_json: &str) -> Result<JsValue, JsValue> {
    let result = classify_json(features_json, options_json).map_err(to_js_error)?;
    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

/// `n` evenly stepped symbol sizes from `min` to `max`.
#[wasm_bindgen(js_name = sizeRange)]
pub fn size_range(min: f64, max: f64, n: usize) -> js_sys::Float64Array {
    js_sys::Float64Array::from(core_size_range(min, max, n).as_slice())
}
