//! Fitlog WASM Module
//!
//! This crate provides WebAssembly bindings for the metabolic estimates so
//! the app can preview figures offline. The numbers are the same ones the
//! backend estimator produces.

use fitlog_shared::health_metrics::{self, ActivityLevel, BiologicalSex, StepCalorieParams};
use fitlog_shared::{round_kcal, BmrSource, BodyProfile, DefaultProfile};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn sex(is_male: bool) -> BiologicalSex {
    if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    }
}

/// Calculate BMR (Mifflin-St Jeor), unrounded
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, is_male: bool) -> f64 {
    health_metrics::calculate_bmr(weight_kg, height_cm, age_years, sex(is_male))
}

/// Calculate TDEE from a BMR and an activity label
///
/// Unknown labels use the sedentary multiplier.
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> i32 {
    health_metrics::calculate_tdee(bmr, ActivityLevel::from_label(Some(activity_level)))
}

/// Body fat percentage from weight (kg) and height (inches)
#[wasm_bindgen]
pub fn calculate_body_fat_percentage(
    weight_kg: f64,
    height_inches: f64,
    age_years: u32,
    is_male: bool,
) -> f64 {
    health_metrics::calculate_body_fat_percentage(weight_kg, height_inches, age_years, sex(is_male))
}

/// Calories burned walking `steps`
#[wasm_bindgen]
pub fn calculate_calories_from_steps(
    steps: u32,
    weight_kg: f64,
    height_cm: f64,
    is_male: bool,
    stride_length_m: Option<f64>,
) -> i32 {
    let params = StepCalorieParams {
        weight_kg,
        height_cm,
        sex: sex(is_male),
        stride_length_m,
    };
    health_metrics::calculate_calories_from_steps(steps, &params)
}

#[wasm_bindgen]
pub fn calculate_simple_calories_from_steps(steps: u32, weight_kg: f64) -> i32 {
    health_metrics::calculate_simple_calories_from_steps(steps, weight_kg)
}

#[derive(Debug, Serialize)]
struct EnergySummary {
    bmr: i32,
    tdee: i32,
}

/// Resolve BMR the way the estimator does, without its cache
fn energy_summary(profile_json: &str) -> Result<EnergySummary, serde_json::Error> {
    let profile: BodyProfile = serde_json::from_str(profile_json)?;
    let defaults = DefaultProfile::default();

    let bmr = match profile.with_defaults(&defaults).bmr_source() {
        BmrSource::Stored(stored) => round_kcal(stored),
        BmrSource::Complete {
            weight_kg,
            height_cm,
            age_years,
            sex,
        } => round_kcal(health_metrics::calculate_bmr(weight_kg, height_cm, age_years, sex)),
        BmrSource::Partial { .. } | BmrSource::Insufficient => 0,
    };

    Ok(EnergySummary {
        bmr,
        tdee: health_metrics::calculate_tdee(f64::from(bmr), profile.activity_level.unwrap_or_default()),
    })
}

/// BMR/TDEE for a JSON body profile, returned as JSON
#[wasm_bindgen]
pub fn energy_summary_json(profile_json: &str) -> Result<String, JsValue> {
    energy_summary(profile_json)
        .and_then(|summary| serde_json::to_string(&summary))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_and_tdee() {
        let bmr = calculate_bmr(70.0, 175.0, 30, true);
        assert!((bmr - 1648.75).abs() < 1e-9);
        assert_eq!(calculate_tdee(bmr, "moderate"), 2556);
        assert_eq!(calculate_tdee(bmr, "unknown"), 1979);
    }

    #[test]
    fn test_steps() {
        assert_eq!(calculate_calories_from_steps(10_000, 70.0, 175.0, true, None), 305);
        assert_eq!(calculate_calories_from_steps(0, 70.0, 175.0, true, None), 0);
        assert_eq!(calculate_simple_calories_from_steps(10_000, 70.0), 400);
    }

    #[test]
    fn test_body_fat_is_clamped() {
        assert_eq!(calculate_body_fat_percentage(70.0, 0.0, 30, true), 0.0);
        assert!(calculate_body_fat_percentage(400.0, 40.0, 90, false) <= 100.0);
    }

    #[test]
    fn test_energy_summary() {
        let summary =
            energy_summary(r#"{"weight_kg":70,"height_cm":175,"activity_level":"light"}"#).unwrap();
        assert_eq!(summary.bmr, 1649);
        // 1649 * 1.375
        assert_eq!(summary.tdee, 2267);

        let summary = energy_summary(r#"{"stored_bmr":1500}"#).unwrap();
        assert_eq!(summary.bmr, 1500);

        let summary = energy_summary("{}").unwrap();
        assert_eq!(summary.bmr, 0);
        assert_eq!(summary.tdee, 0);
    }
}
