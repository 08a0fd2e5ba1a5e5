//! Step logging service
//!
//! Picks the best available calorie estimate for a step log:
//! 1. Stride-based, when weight and height are known
//! 2. The caller's own figure
//! 3. Weight-only flat rate
//! 4. Zero

use crate::error::ServiceResult;
use crate::services::ProfileService;
use crate::state::AppState;
use fitlog_shared::health_metrics::{
    calculate_calories_from_steps, calculate_simple_calories_from_steps, StepCalorieParams,
};
use fitlog_shared::types::{StepEstimateMethod, StepEstimateResponse, StepLogRequest};
use fitlog_shared::units::{parse_unit, HeightUnit, WeightUnit};
use fitlog_shared::validation::{
    validate_height_cm, validate_steps, validate_stride_length, validate_weight,
};
use fitlog_shared::ValidationError;
use tracing::{debug, warn};

/// Step logging service
pub struct StepService;

impl StepService {
    /// Calorie estimate for a step log
    pub fn estimate(state: &AppState, req: &StepLogRequest) -> ServiceResult<StepEstimateResponse> {
        let validate = state.validates_inputs();
        let steps = Self::step_count(req.steps, validate)?;

        let weight_unit: WeightUnit = parse_unit(req.weight_unit.as_deref())?;
        let height_unit: HeightUnit = parse_unit(req.height_unit.as_deref())?;
        let weight_kg = req.weight.map(|w| weight_unit.to_kg(w));
        let height_cm = req.height.map(|h| height_unit.to_cm(h));
        let sex = ProfileService::parse_sex(req.biological_sex.as_deref())?;
        let caller_calories = Self::caller_calories(req.calories_burned)?;

        if validate {
            Self::validate_body(weight_kg, height_cm, req)?;
        }

        let weight_kg = weight_kg.filter(|w| *w > 0.0);
        let height_cm = height_cm.filter(|h| *h > 0.0);

        let (calories_burned, distance_km, method) = match (weight_kg, height_cm) {
            (Some(weight_kg), Some(height_cm)) => {
                let params = StepCalorieParams {
                    weight_kg,
                    height_cm,
                    sex: sex.unwrap_or(state.bmr_cache().defaults().sex),
                    stride_length_m: req.stride_length_m,
                };
                let distance = (params.distance_km(steps) * 1000.0).round() / 1000.0;
                (
                    calculate_calories_from_steps(steps, &params),
                    Some(distance),
                    StepEstimateMethod::Stride,
                )
            }
            _ => match (caller_calories, weight_kg) {
                (Some(calories), _) => (calories, None, StepEstimateMethod::CallerSupplied),
                (None, Some(weight_kg)) => (
                    calculate_simple_calories_from_steps(steps, weight_kg),
                    None,
                    StepEstimateMethod::Simple,
                ),
                (None, None) => (0, None, StepEstimateMethod::Unavailable),
            },
        };

        debug!(steps, calories_burned, ?method, "Step calorie estimate");

        Ok(StepEstimateResponse {
            steps,
            calories_burned,
            distance_km,
            method,
        })
    }

    /// Negative counts are always rejected; the upper bound only when
    /// validating
    fn step_count(steps: i64, validate: bool) -> ServiceResult<u32> {
        let result = if validate {
            validate_steps(steps)
        } else if steps < 0 {
            Err(ValidationError::new("steps", "cannot be negative"))
        } else {
            u32::try_from(steps).map_err(|_| ValidationError::new("steps", "out of range"))
        };

        result.map_err(|err| {
            warn!(steps, "Rejected step count: {}", err);
            err.into()
        })
    }

    /// A caller's own figure must not be negative, validating or not
    fn caller_calories(calories: Option<i32>) -> ServiceResult<Option<i32>> {
        match calories {
            Some(c) if c < 0 => {
                warn!(calories = c, "Rejected negative caller calorie figure");
                Err(ValidationError::new("calories_burned", "cannot be negative").into())
            }
            other => Ok(other),
        }
    }

    fn validate_body(
        weight_kg: Option<f64>,
        height_cm: Option<f64>,
        req: &StepLogRequest,
    ) -> Result<(), ValidationError> {
        if let Some(weight) = weight_kg {
            validate_weight(weight)?;
        }
        if let Some(height) = height_cm {
            validate_height_cm(height)?;
        }
        if let Some(stride) = req.stride_length_m {
            validate_stride_length(stride)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rstest::rstest;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    fn unvalidated_state() -> AppState {
        let mut config = AppConfig::default();
        config.estimates.validate_inputs = false;
        AppState::new(config)
    }

    #[test]
    fn test_stride_estimate() {
        let req = StepLogRequest {
            steps: 10_000,
            weight: Some(70.0),
            height: Some(175.0),
            biological_sex: Some("male".to_string()),
            ..Default::default()
        };
        let response = StepService::estimate(&state(), &req).unwrap();
        assert_eq!(response.calories_burned, 305);
        assert_eq!(response.method, StepEstimateMethod::Stride);
        let distance = response.distance_km.unwrap();
        assert!((distance - 7.2625).abs() < 0.001);
    }

    #[test]
    fn test_missing_sex_uses_default() {
        let req = StepLogRequest {
            steps: 10_000,
            weight: Some(70.0),
            height: Some(175.0),
            ..Default::default()
        };
        assert_eq!(StepService::estimate(&state(), &req).unwrap().calories_burned, 305);
    }

    #[test]
    fn test_stride_estimate_wins_over_caller_figure() {
        let req = StepLogRequest {
            steps: 10_000,
            weight: Some(70.0),
            height: Some(175.0),
            calories_burned: Some(999),
            ..Default::default()
        };
        let response = StepService::estimate(&state(), &req).unwrap();
        assert_eq!(response.method, StepEstimateMethod::Stride);
    }

    #[rstest]
    #[case(Some(70.0), Some(250), 250, StepEstimateMethod::CallerSupplied)]
    #[case(Some(70.0), None, 400, StepEstimateMethod::Simple)]
    #[case(None, Some(250), 250, StepEstimateMethod::CallerSupplied)]
    #[case(None, None, 0, StepEstimateMethod::Unavailable)]
    fn test_fallback_ladder(
        #[case] weight: Option<f64>,
        #[case] caller: Option<i32>,
        #[case] expected: i32,
        #[case] method: StepEstimateMethod,
    ) {
        let req = StepLogRequest {
            steps: 10_000,
            weight,
            calories_burned: caller,
            ..Default::default()
        };
        let response = StepService::estimate(&state(), &req).unwrap();
        assert_eq!(response.calories_burned, expected);
        assert_eq!(response.method, method);
        assert_eq!(response.distance_km, None);
    }

    #[test]
    fn test_negative_steps_rejected_even_without_validation() {
        let req = StepLogRequest {
            steps: -5,
            ..Default::default()
        };
        for state in [state(), unvalidated_state()] {
            let err = StepService::estimate(&state, &req).unwrap_err();
            assert_eq!(err.to_response().error.message, "Steps: cannot be negative");
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(70.0), None)]
    #[case(Some(70.0), Some(175.0))]
    fn test_unknown_sex_rejected_on_every_path(
        #[case] weight: Option<f64>,
        #[case] height: Option<f64>,
    ) {
        let req = StepLogRequest {
            steps: 100,
            weight,
            height,
            biological_sex: Some("xyz".to_string()),
            ..Default::default()
        };
        let err = StepService::estimate(&state(), &req).unwrap_err();
        let response = err.to_response();
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.field.as_deref(), Some("biological_sex"));
    }

    #[test]
    fn test_negative_caller_calories_rejected_even_without_validation() {
        let req = StepLogRequest {
            steps: 1_000,
            calories_burned: Some(-500),
            ..Default::default()
        };
        for state in [state(), unvalidated_state()] {
            let err = StepService::estimate(&state, &req).unwrap_err();
            assert_eq!(err.to_response().error.field.as_deref(), Some("calories_burned"));
        }
    }

    #[test]
    fn test_zero_steps() {
        let req = StepLogRequest {
            steps: 0,
            weight: Some(70.0),
            height: Some(175.0),
            ..Default::default()
        };
        let response = StepService::estimate(&state(), &req).unwrap();
        assert_eq!(response.calories_burned, 0);
        assert_eq!(response.distance_km, Some(0.0));
    }

    #[test]
    fn test_implausible_stride_only_rejected_when_validating() {
        let req = StepLogRequest {
            steps: 1_000,
            weight: Some(70.0),
            height: Some(175.0),
            stride_length_m: Some(10.0),
            ..Default::default()
        };
        assert!(StepService::estimate(&state(), &req).is_err());
        // 1000 * 10 m = 10 km, 10 * 42
        let response = StepService::estimate(&unvalidated_state(), &req).unwrap();
        assert_eq!(response.calories_burned, 420);
    }
}
