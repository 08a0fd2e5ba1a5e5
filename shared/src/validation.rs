//! Input validation at the estimate boundary
//!
//! The calculator is total and accepts anything; these checks run in the
//! service layer before input reaches it, so physically impossible values
//! are rejected instead of producing silent garbage.

use crate::errors::ValidationError;
use crate::profile::BodyProfile;

pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MIN_AGE_YEARS: u32 = 1;
pub const MAX_AGE_YEARS: u32 = 150;
pub const MAX_STRIDE_M: f64 = 3.0;
/// More than anyone walks in a day; catches unit mistakes
pub const MAX_DAILY_STEPS: i64 = 200_000;

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), ValidationError> {
    require_finite("weight", weight_kg)?;
    if weight_kg < MIN_WEIGHT_KG {
        return Err(ValidationError::new("weight", "must be at least 20 kg"));
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(ValidationError::new("weight", "must be at most 500 kg"));
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), ValidationError> {
    require_finite("height", height_cm)?;
    if height_cm < MIN_HEIGHT_CM {
        return Err(ValidationError::new("height", "must be at least 50 cm"));
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err(ValidationError::new("height", "must be at most 300 cm"));
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age_years: u32) -> Result<(), ValidationError> {
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age_years) {
        return Err(ValidationError::new("age", "must be between 1 and 150 years"));
    }
    Ok(())
}

/// Validate a previously stored BMR
pub fn validate_stored_bmr(bmr: f64) -> Result<(), ValidationError> {
    require_finite("previous_bmr", bmr)?;
    if bmr < 0.0 {
        return Err(ValidationError::new("previous_bmr", "cannot be negative"));
    }
    Ok(())
}

/// Validate a raw step count and narrow it to the calculator's type
pub fn validate_steps(steps: i64) -> Result<u32, ValidationError> {
    if steps < 0 {
        return Err(ValidationError::new("steps", "cannot be negative"));
    }
    if steps > MAX_DAILY_STEPS {
        return Err(ValidationError::new("steps", "must be at most 200000"));
    }
    u32::try_from(steps).map_err(|_| ValidationError::new("steps", "out of range"))
}

/// Validate an explicit stride length (in meters)
pub fn validate_stride_length(stride_m: f64) -> Result<(), ValidationError> {
    require_finite("stride_length", stride_m)?;
    if stride_m <= 0.0 || stride_m > MAX_STRIDE_M {
        return Err(ValidationError::new(
            "stride_length",
            "must be greater than 0 and at most 3 m",
        ));
    }
    Ok(())
}

/// Validate every field a profile carries; absent fields are fine
pub fn validate_body_profile(profile: &BodyProfile) -> Result<(), ValidationError> {
    if let Some(weight) = profile.weight_kg {
        validate_weight(weight)?;
    }
    if let Some(height) = profile.height_cm {
        validate_height_cm(height)?;
    }
    if let Some(age) = profile.age_years {
        validate_age(age)?;
    }
    if let Some(bmr) = profile.stored_bmr {
        validate_stored_bmr(bmr)?;
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "age" | "age_years" => "Age",
        "date_of_birth" => "Date of Birth",
        "biological_sex" | "sex" => "Biological Sex",
        "activity_level" => "Activity Level",
        "previous_bmr" | "stored_bmr" => "Previous BMR",
        "steps" => "Steps",
        "stride_length" => "Stride Length",
        "weight_unit" => "Weight Unit",
        "height_unit" => "Height Unit",
        _ => field_name,
    }
}
