//! Metabolic estimate calculations
//!
//! Turns raw body measurements and step counts into calorie estimates:
//! BMR, TDEE, body fat percentage and step-derived energy burn.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O, no shared state, identical inputs give
//!    bit-identical outputs
//! 2. **Total**: Every function returns a value for any numeric input;
//!    physically implausible input is rejected upstream, not here
//! 3. **Rounding at the edge**: BMR is returned unrounded, derived kcal
//!    figures are rounded to whole calories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::units::CM_PER_INCH;

// ============================================================================
// Profile Categories
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used for physiological formula branches only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiologicalSex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(ParseError::BiologicalSex(s.to_string())),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Resolve a stored label, falling back to sedentary for unknown or
    /// missing values
    pub fn from_label(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" | "extra_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(ParseError::ActivityLevel(s.to_string())),
        }
    }
}

/// Round an energy figure to whole kilocalories
#[inline]
pub fn round_kcal(value: f64) -> i32 {
    value.round() as i32
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// BMR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmrMethod {
    /// Mifflin-St Jeor (most accurate for most people)
    #[default]
    MifflinStJeor,
    /// Harris-Benedict (revised, less accurate)
    HarrisBenedict,
}

/// Something that can turn body metrics into a resting energy figure
///
/// The estimate cache computes through this seam, so alternative
/// equations (or instrumented ones) can be swapped in.
pub trait BmrFormula: Send + Sync {
    fn estimate(&self, weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64;
}

impl BmrFormula for BmrMethod {
    fn estimate(&self, weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
        match self {
            BmrMethod::MifflinStJeor => calculate_bmr(weight_kg, height_cm, age_years, sex),
            BmrMethod::HarrisBenedict => {
                calculate_bmr_harris_benedict(weight_kg, height_cm, age_years, sex)
            }
        }
    }
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// The result is not rounded.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate BMR using Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr_harris_benedict(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: BiologicalSex,
) -> f64 {
    let age = f64::from(age_years);
    match sex {
        BiologicalSex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        BiologicalSex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier, rounded to whole kcal
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> i32 {
    round_kcal(bmr * activity_level.multiplier())
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)². Non-positive height gives 0.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Estimate body fat percentage from BMI (Deurenberg)
///
/// Formula: BF% = 1.20 × BMI + 0.23 × Age - 10.8 × sex - 5.4
/// where sex = 1 for male, 0 for female. Not clamped.
pub fn estimate_body_fat_from_bmi(bmi: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let sex_factor = match sex {
        BiologicalSex::Male => 1.0,
        BiologicalSex::Female => 0.0,
    };
    1.20 * bmi + 0.23 * f64::from(age_years) - 10.8 * sex_factor - 5.4
}

/// Body fat percentage from weight and height in inches
///
/// Clamped to [0, 100]; the raw regression leaves that range for extreme
/// BMIs. Non-positive height gives 0.
pub fn calculate_body_fat_percentage(
    weight_kg: f64,
    height_inches: f64,
    age_years: u32,
    sex: BiologicalSex,
) -> f64 {
    if height_inches <= 0.0 {
        return 0.0;
    }
    let bmi = calculate_bmi(weight_kg, height_inches * CM_PER_INCH);
    estimate_body_fat_from_bmi(bmi, age_years, sex).clamp(0.0, 100.0)
}

/// Body fat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFatCategory::Essential => "essential",
            BodyFatCategory::Athletic => "athletic",
            BodyFatCategory::Fitness => "fitness",
            BodyFatCategory::Average => "average",
            BodyFatCategory::Obese => "obese",
        }
    }
}

/// Classify body fat percentage
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> BodyFatCategory {
    let thresholds = match sex {
        BiologicalSex::Male => [6.0, 14.0, 18.0, 25.0],
        BiologicalSex::Female => [14.0, 21.0, 25.0, 32.0],
    };
    if body_fat_percent < thresholds[0] {
        BodyFatCategory::Essential
    } else if body_fat_percent < thresholds[1] {
        BodyFatCategory::Athletic
    } else if body_fat_percent < thresholds[2] {
        BodyFatCategory::Fitness
    } else if body_fat_percent < thresholds[3] {
        BodyFatCategory::Average
    } else {
        BodyFatCategory::Obese
    }
}

// ============================================================================
// Step Calorie Calculations
// ============================================================================

/// Stride coefficient (fraction of height) for men
const MALE_STRIDE_FACTOR: f64 = 0.415;
/// Stride coefficient (fraction of height) for everyone else
const FEMALE_STRIDE_FACTOR: f64 = 0.413;
/// Walking burn at moderate intensity, kcal per kg per km
const KCAL_PER_KG_PER_KM: f64 = 0.6;
/// Flat per-step burn for a 70 kg reference walker
const SIMPLE_KCAL_PER_STEP: f64 = 0.04;
const REFERENCE_WEIGHT_KG: f64 = 70.0;

/// Inputs for the stride-based step calorie estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepCalorieParams {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: BiologicalSex,
    /// Explicit stride in meters; derived from height when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride_length_m: Option<f64>,
}

impl StepCalorieParams {
    /// Stride to use: the explicit one when positive, else the derived one
    pub fn effective_stride_m(&self) -> f64 {
        self.stride_length_m
            .filter(|stride| *stride > 0.0)
            .unwrap_or_else(|| stride_length_m(self.height_cm, self.sex))
    }

    /// Distance covered by `steps`, in kilometers
    pub fn distance_km(&self, steps: u32) -> f64 {
        f64::from(steps) * self.effective_stride_m() / 1000.0
    }
}

/// Estimate stride length in meters from height
pub fn stride_length_m(height_cm: f64, sex: BiologicalSex) -> f64 {
    let factor = match sex {
        BiologicalSex::Male => MALE_STRIDE_FACTOR,
        BiologicalSex::Female => FEMALE_STRIDE_FACTOR,
    };
    height_cm * factor / 100.0
}

/// Calories burned walking `steps`, from stride and body weight
///
/// distance_km × (weight × 0.6), rounded
pub fn calculate_calories_from_steps(steps: u32, params: &StepCalorieParams) -> i32 {
    let calories_per_km = params.weight_kg * KCAL_PER_KG_PER_KM;
    round_kcal(params.distance_km(steps) * calories_per_km)
}

/// Fallback estimate when only weight is known
pub fn calculate_simple_calories_from_steps(steps: u32, weight_kg: f64) -> i32 {
    round_kcal(f64::from(steps) * SIMPLE_KCAL_PER_STEP * weight_kg / REFERENCE_WEIGHT_KG)
}
