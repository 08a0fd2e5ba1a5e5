//! Request and response types for the estimate collaborators

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Profile Input
// ============================================================================

/// Body profile as callers send it (values plus unit labels)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    /// Weight value in `weight_unit` (defaults to kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    /// Height value in `height_unit` (defaults to cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_unit: Option<String>,
    /// Age in years; wins over `date_of_birth` when both are sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// male / female
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biological_sex: Option<String>,
    /// sedentary, light, moderate, active, very_active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// BMR persisted with the user record by an earlier estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_bmr: Option<f64>,
}

// ============================================================================
// Energy Estimates
// ============================================================================

/// How a BMR figure was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrOrigin {
    /// Served from the estimate cache
    Cached,
    /// Previously persisted value
    Stored,
    /// Computed from a complete profile
    Computed,
    /// Computed with default age and/or sex
    Defaulted,
    /// Not enough data; the figure is 0
    Insufficient,
}

/// BMR/TDEE pair for persistence or display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimateResponse {
    /// Basal Metabolic Rate
    pub bmr: i32,
    /// Total Daily Energy Expenditure
    pub tdee: i32,
    pub activity_level: String,
    pub origin: BmrOrigin,
    pub unit: String,
}

/// Body fat estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResponse {
    pub estimated_percent: f64,
    pub category: String,
    pub source: String,
}

// ============================================================================
// Step Estimates
// ============================================================================

/// Step log as sent by the step tracking screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepLogRequest {
    pub steps: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biological_sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride_length_m: Option<f64>,
    /// Caller's own estimate, used when the profile is incomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
}

/// Which estimator produced a step calorie figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEstimateMethod {
    Stride,
    CallerSupplied,
    Simple,
    /// Nothing to estimate from; the figure is 0
    Unavailable,
}

/// Step calorie estimate to store alongside the step count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEstimateResponse {
    pub steps: u32,
    pub calories_burned: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub method: StepEstimateMethod,
}

// ============================================================================
// Envelope
// ============================================================================

/// One request to the estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateRequest {
    /// A new weight entry was logged; BMR/TDEE to persist
    WeightLog(ProfileInput),
    /// Activity screen wants BMR/TDEE for display
    Display(ProfileInput),
    BodyFat(ProfileInput),
    Steps(StepLogRequest),
    /// Drop one cached profile, or everything when no profile is given
    ClearCache {
        #[serde(default)]
        profile: Option<ProfileInput>,
    },
}

/// Response to one estimator request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateResponse {
    Energy(EnergyEstimateResponse),
    BodyFat(BodyFatResponse),
    Steps(StepEstimateResponse),
    CacheCleared { removed: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tagging() {
        let json = r#"{"kind":"weight_log","weight":154,"weight_unit":"lbs","age_years":30}"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        match request {
            EstimateRequest::WeightLog(input) => {
                assert_eq!(input.weight, Some(154.0));
                assert_eq!(input.weight_unit.as_deref(), Some("lbs"));
                assert_eq!(input.height, None);
            }
            other => panic!("unexpected request: {other:?}"),
        }

        let json = r#"{"kind":"clear_cache"}"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request, EstimateRequest::ClearCache { profile: None }));
    }

    #[test]
    fn test_step_request_requires_steps() {
        let json = r#"{"kind":"steps","weight":70}"#;
        assert!(serde_json::from_str::<EstimateRequest>(json).is_err());
    }

    #[test]
    fn test_response_serialization() {
        let response = EstimateResponse::Steps(StepEstimateResponse {
            steps: 0,
            calories_burned: 0,
            distance_km: None,
            method: StepEstimateMethod::Unavailable,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "steps");
        assert_eq!(json["method"], "unavailable");
        assert!(json.get("distance_km").is_none());
    }
}
