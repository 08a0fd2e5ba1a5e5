//! Profile service - turns wire profiles into SI body profiles

use crate::error::ServiceResult;
use chrono::NaiveDate;
use fitlog_shared::profile::{age_from_date_of_birth, BodyProfile};
use fitlog_shared::types::ProfileInput;
use fitlog_shared::units::{parse_unit, HeightUnit, WeightUnit};
use fitlog_shared::validation::validate_body_profile;
use fitlog_shared::{ActivityLevel, BiologicalSex, ValidationError};
use tracing::warn;

/// Profile conversion shared by every estimate path
pub struct ProfileService;

impl ProfileService {
    /// Convert caller input into a `BodyProfile`
    ///
    /// Weight and height are converted to kg/cm using their unit labels.
    /// `age_years` wins over `date_of_birth`. An unknown activity label falls
    /// back to sedentary; unknown unit or sex labels are rejected.
    pub fn body_profile(
        input: &ProfileInput,
        today: NaiveDate,
        validate: bool,
    ) -> ServiceResult<BodyProfile> {
        let weight_unit: WeightUnit = parse_unit(input.weight_unit.as_deref())?;
        let height_unit: HeightUnit = parse_unit(input.height_unit.as_deref())?;

        let age_years = match (input.age_years, input.date_of_birth) {
            (Some(age), _) => Some(age),
            (None, Some(dob)) => {
                let age = age_from_date_of_birth(dob, today);
                if age.is_none() && validate {
                    warn!(%dob, "Rejected date of birth in the future");
                    return Err(
                        ValidationError::new("date_of_birth", "cannot be in the future").into(),
                    );
                }
                age
            }
            (None, None) => None,
        };

        let profile = BodyProfile {
            weight_kg: input.weight.map(|w| weight_unit.to_kg(w)),
            height_cm: input.height.map(|h| height_unit.to_cm(h)),
            age_years,
            sex: Self::parse_sex(input.biological_sex.as_deref())?,
            activity_level: input
                .activity_level
                .as_deref()
                .map(|label| ActivityLevel::from_label(Some(label))),
            stored_bmr: input.previous_bmr,
        };

        if validate {
            if let Err(err) = validate_body_profile(&profile) {
                warn!(field = %err.field, "Rejected profile: {}", err);
                return Err(err.into());
            }
        }

        Ok(profile)
    }

    /// Parse an optional sex label; blank counts as absent
    pub fn parse_sex(label: Option<&str>) -> ServiceResult<Option<BiologicalSex>> {
        match label.map(str::trim) {
            Some(l) if !l.is_empty() => Ok(Some(l.parse()?)),
            _ => Ok(None),
        }
    }
}
