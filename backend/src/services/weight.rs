//! Weight logging service
//!
//! When a weight entry is logged the app persists a BMR/TDEE pair with it.
//! The figure comes from the shared cache so the activity screen shows the
//! same number later.

use crate::error::ServiceResult;
use crate::services::{energy_response, ProfileService};
use crate::state::AppState;
use chrono::NaiveDate;
use fitlog_shared::types::{EnergyEstimateResponse, ProfileInput};
use fitlog_shared::ValidationError;
use tracing::{info, warn};

/// Weight logging service
pub struct WeightService;

impl WeightService {
    /// BMR/TDEE to store alongside a newly logged weight
    ///
    /// A weight is required; everything else degrades to defaults.
    pub fn estimate_after_log(
        state: &AppState,
        input: &ProfileInput,
        today: NaiveDate,
    ) -> ServiceResult<EnergyEstimateResponse> {
        let profile = ProfileService::body_profile(input, today, state.validates_inputs())?;

        if profile.weight().is_none() {
            warn!("Weight log without a usable weight");
            return Err(ValidationError::new("weight", "is required").into());
        }

        let lookup = state.bmr_cache().lookup_for_logging(&profile);
        let response = energy_response(&profile, lookup);

        info!(
            bmr = response.bmr,
            tdee = response.tdee,
            origin = ?response.origin,
            "Energy estimate for weight log"
        );

        Ok(response)
    }
}
