#![cfg(target_arch = "wasm32")]

use choro_wasm::{classify, size_range};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn size_range_is_inclusive() {
    let sizes = size_range(2.0, 10.0, 5).to_vec();
    assert_eq!(sizes, vec![2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[wasm_bindgen_test]
fn classify_returns_object() {
    let features = r#"[
        {"geometry": {"type": "Point"}, "properties": {"v": 1}},
        {"geometry": {"type": "Point"}, "properties": {"v": 2}},
        {"geometry": {"type": "Point"}, "properties": {"v": 3}},
        {"geometry": {"type": "Point"}, "properties": {"v": 4}}
    ]"#;
    let value = classify(features, r#"{"field": "v", "classes": 3}"#).unwrap();
    assert!(value.is_object());
    assert!(classify(features, r#"{"field": "v", "classes": 9}"#).is_err());
}
