//! Activity screen service - energy summary and body composition estimates

use crate::error::ServiceResult;
use crate::services::{energy_response, ProfileService};
use crate::state::AppState;
use chrono::NaiveDate;
use fitlog_shared::health_metrics::{calculate_body_fat_percentage, classify_body_fat};
use fitlog_shared::types::{BodyFatResponse, EnergyEstimateResponse, ProfileInput};
use fitlog_shared::units::HeightUnit;
use fitlog_shared::ValidationError;
use tracing::debug;

const BODY_FAT_SOURCE: &str = "BMI-based estimate";

/// Activity screen service
pub struct ActivityService;

impl ActivityService {
    /// BMR/TDEE for display
    ///
    /// Resolves through the same cache path as weight logging, so equal
    /// inputs always show the figure that was persisted.
    pub fn energy_summary(
        state: &AppState,
        input: &ProfileInput,
        today: NaiveDate,
    ) -> ServiceResult<EnergyEstimateResponse> {
        let profile = ProfileService::body_profile(input, today, state.validates_inputs())?;
        let lookup = state.bmr_cache().lookup_for_display(&profile);
        let response = energy_response(&profile, lookup);

        debug!(bmr = response.bmr, origin = ?response.origin, "Energy summary");
        Ok(response)
    }

    /// Body fat estimate from BMI, age and sex
    ///
    /// Needs weight and height; missing age or sex come from the configured
    /// defaults.
    pub fn body_fat_estimate(
        state: &AppState,
        input: &ProfileInput,
        today: NaiveDate,
    ) -> ServiceResult<BodyFatResponse> {
        let profile = ProfileService::body_profile(input, today, state.validates_inputs())?;

        let weight_kg = profile
            .weight()
            .ok_or_else(|| ValidationError::new("weight", "is required"))?;
        let height_cm = profile
            .height()
            .ok_or_else(|| ValidationError::new("height", "is required"))?;

        let defaults = state.bmr_cache().defaults();
        let age = profile.age().unwrap_or(defaults.age_years);
        let sex = profile.sex.unwrap_or(defaults.sex);

        let height_inches = HeightUnit::Inches.from_cm(height_cm);
        let percent = calculate_body_fat_percentage(weight_kg, height_inches, age, sex);

        Ok(BodyFatResponse {
            estimated_percent: (percent * 10.0).round() / 10.0,
            category: classify_body_fat(percent, sex).as_str().to_string(),
            source: BODY_FAT_SOURCE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_body_fat_estimate() {
        let state = AppState::new(AppConfig::default());
        let input = ProfileInput {
            weight: Some(70.0),
            height: Some(69.0),
            height_unit: Some("in".to_string()),
            age_years: Some(30),
            biological_sex: Some("female".to_string()),
            ..Default::default()
        };
        let response = ActivityService::body_fat_estimate(&state, &input, today()).unwrap();
        assert_eq!(response.estimated_percent, 28.8);
        assert_eq!(response.category, "average");
        assert_eq!(response.source, BODY_FAT_SOURCE);
    }

    #[test]
    fn test_body_fat_needs_height() {
        let state = AppState::new(AppConfig::default());
        let input = ProfileInput {
            weight: Some(70.0),
            ..Default::default()
        };
        let err = ActivityService::body_fat_estimate(&state, &input, today()).unwrap_err();
        assert_eq!(err.to_response().error.field.as_deref(), Some("height"));
    }

    #[test]
    fn test_energy_summary_without_profile() {
        let state = AppState::new(AppConfig::default());
        let response =
            ActivityService::energy_summary(&state, &ProfileInput::default(), today()).unwrap();
        assert_eq!(response.bmr, 0);
        assert_eq!(response.tdee, 0);
        assert_eq!(response.activity_level, "sedentary");
    }
}
