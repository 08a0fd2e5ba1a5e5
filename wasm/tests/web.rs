//! Browser-side tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use fitlog_wasm::{calculate_calories_from_steps, energy_summary_json};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn energy_summary_round_trips_through_js() {
    let json = energy_summary_json(r#"{"weight_kg":70,"height_cm":175}"#).unwrap();
    assert_eq!(json, r#"{"bmr":1649,"tdee":1979}"#);
}

#[wasm_bindgen_test]
fn malformed_profile_is_an_error() {
    assert!(energy_summary_json("not json").is_err());
}

#[wasm_bindgen_test]
fn explicit_stride_is_used() {
    // 1000 * 0.8 m = 0.8 km, 0.8 * 42
    assert_eq!(calculate_calories_from_steps(1_000, 70.0, 175.0, false, Some(0.8)), 34);
}
