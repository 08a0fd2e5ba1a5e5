//! Cache key derivation for BMR estimates.

use fitlog_shared::BodyProfile;

/// Separator between key fields.
const SEPARATOR: char = '_';
/// Placeholder for an absent sex.
const UNKNOWN_SEX: &str = "unknown";

/// Absent becomes `0`; adding `0.0` turns `-0.0` into `0.0` so both print `0`
fn number(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0) + 0.0
}

/// Build the cache signature for a profile.
///
/// Concatenates weight, height, age, sex and stored BMR. Absent numbers
/// become `0` and an absent sex becomes `unknown`, so a missing field and an
/// explicit zero share one entry. Activity level is not part of the key:
/// it only feeds TDEE, which is never cached.
pub fn bmr_cache_key(profile: &BodyProfile) -> String {
    let sex = profile.sex.map(|s| s.as_str()).unwrap_or(UNKNOWN_SEX);
    format!(
        "{weight}{SEPARATOR}{height}{SEPARATOR}{age}{SEPARATOR}{sex}{SEPARATOR}{stored}",
        weight = number(profile.weight_kg),
        height = number(profile.height_cm),
        age = profile.age_years.unwrap_or(0),
        stored = number(profile.stored_bmr),
    )
}
