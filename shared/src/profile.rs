//! Body profile supplied by callers of the estimate pipeline
//!
//! Every field is optional: a profile is whatever the app happened to know
//! about the user when the estimate was asked for. Non-positive numbers are
//! treated the same as missing ones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::health_metrics::{ActivityLevel, BiologicalSex};

/// Profile values filled in when a caller leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub age_years: u32,
    pub sex: BiologicalSex,
}

impl Default for DefaultProfile {
    fn default() -> Self {
        Self {
            age_years: 30,
            sex: BiologicalSex::Male,
        }
    }
}

/// Body metrics for one estimate request, in SI units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<BiologicalSex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// BMR persisted by an earlier estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_bmr: Option<f64>,
}

/// Where a BMR for a profile has to come from, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BmrSource {
    /// A previously persisted value, trusted over recomputation
    Stored(f64),
    /// Everything the formula needs is present
    Complete {
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        sex: BiologicalSex,
    },
    /// Weight and height only; age and/or sex come from defaults
    Partial {
        weight_kg: f64,
        height_cm: f64,
        age_years: Option<u32>,
        sex: Option<BiologicalSex>,
    },
    /// Not enough to estimate anything
    Insufficient,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

impl BodyProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn with_height_cm(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    pub fn with_age_years(mut self, age_years: u32) -> Self {
        self.age_years = Some(age_years);
        self
    }

    pub fn with_sex(mut self, sex: BiologicalSex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_activity_level(mut self, activity_level: ActivityLevel) -> Self {
        self.activity_level = Some(activity_level);
        self
    }

    pub fn with_stored_bmr(mut self, stored_bmr: f64) -> Self {
        self.stored_bmr = Some(stored_bmr);
        self
    }

    /// Usable weight (present and positive)
    pub fn weight(&self) -> Option<f64> {
        positive(self.weight_kg)
    }

    /// Usable height (present and positive)
    pub fn height(&self) -> Option<f64> {
        positive(self.height_cm)
    }

    /// Usable age (present and non-zero)
    pub fn age(&self) -> Option<u32> {
        self.age_years.filter(|age| *age > 0)
    }

    /// Fill missing age and sex from `defaults`; present values win
    pub fn with_defaults(mut self, defaults: &DefaultProfile) -> Self {
        self.age_years = Some(self.age().unwrap_or(defaults.age_years));
        self.sex = Some(self.sex.unwrap_or(defaults.sex));
        self
    }

    /// Classify this profile into the BMR resolution ladder
    pub fn bmr_source(&self) -> BmrSource {
        if let Some(stored) = positive(self.stored_bmr) {
            return BmrSource::Stored(stored);
        }

        match (self.weight(), self.height(), self.age(), self.sex) {
            (Some(weight_kg), Some(height_cm), Some(age_years), Some(sex)) => BmrSource::Complete {
                weight_kg,
                height_cm,
                age_years,
                sex,
            },
            (Some(weight_kg), Some(height_cm), age_years, sex) => BmrSource::Partial {
                weight_kg,
                height_cm,
                age_years,
                sex,
            },
            _ => BmrSource::Insufficient,
        }
    }
}

/// Whole years between `dob` and `today`, None if `dob` is in the future
pub fn age_from_date_of_birth(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(dob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete() -> BodyProfile {
        BodyProfile::new()
            .with_weight_kg(70.0)
            .with_height_cm(175.0)
            .with_age_years(30)
            .with_sex(BiologicalSex::Male)
    }

    #[test]
    fn test_stored_bmr_takes_priority() {
        let profile = complete().with_stored_bmr(1500.0);
        assert_eq!(profile.bmr_source(), BmrSource::Stored(1500.0));
    }

    #[test]
    fn test_complete_profile() {
        assert_eq!(
            complete().bmr_source(),
            BmrSource::Complete {
                weight_kg: 70.0,
                height_cm: 175.0,
                age_years: 30,
                sex: BiologicalSex::Male,
            }
        );
    }

    #[test]
    fn test_weight_and_height_only_is_partial() {
        let profile = BodyProfile::new().with_weight_kg(70.0).with_height_cm(175.0);
        assert_eq!(
            profile.bmr_source(),
            BmrSource::Partial {
                weight_kg: 70.0,
                height_cm: 175.0,
                age_years: None,
                sex: None,
            }
        );
    }

    #[rstest]
    #[case(BodyProfile::new())]
    #[case(BodyProfile::new().with_weight_kg(70.0))]
    #[case(BodyProfile::new().with_height_cm(175.0).with_age_years(30))]
    #[case(BodyProfile::new().with_weight_kg(0.0).with_height_cm(175.0))]
    #[case(BodyProfile::new().with_stored_bmr(0.0))]
    #[case(BodyProfile::new().with_stored_bmr(-10.0).with_weight_kg(70.0))]
    fn test_insufficient_profiles(#[case] profile: BodyProfile) {
        assert_eq!(profile.bmr_source(), BmrSource::Insufficient);
    }

    #[test]
    fn test_zero_age_counts_as_missing() {
        let profile = complete().with_age_years(0);
        assert!(matches!(
            profile.bmr_source(),
            BmrSource::Partial { age_years: None, .. }
        ));
    }

    #[test]
    fn test_with_defaults_keeps_present_values() {
        let defaults = DefaultProfile::default();
        let filled = BodyProfile::new().with_sex(BiologicalSex::Female).with_defaults(&defaults);
        assert_eq!(filled.age_years, Some(30));
        assert_eq!(filled.sex, Some(BiologicalSex::Female));

        let filled = BodyProfile::new().with_age_years(45).with_defaults(&defaults);
        assert_eq!(filled.age_years, Some(45));
        assert_eq!(filled.sex, Some(BiologicalSex::Male));
    }

    #[test]
    fn test_age_from_date_of_birth() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let dob = NaiveDate::from_ymd_opt(1990, 6, 16).unwrap();
        assert_eq!(age_from_date_of_birth(dob, today), Some(33));

        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        assert_eq!(age_from_date_of_birth(dob, today), Some(34));

        let future = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(age_from_date_of_birth(future, today), None);
    }
}
