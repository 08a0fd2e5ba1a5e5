//! Estimate services
//!
//! Services sit between callers and the calculator/cache: they convert
//! wire input, validate it, and pick the right estimate path.

pub mod activity;
pub mod profile;
pub mod steps;
pub mod weight;

pub use activity::ActivityService;
pub use profile::ProfileService;
pub use steps::StepService;
pub use weight::WeightService;

use crate::cache::BmrLookup;
use crate::error::ServiceResult;
use crate::state::AppState;
use chrono::{NaiveDate, Utc};
use fitlog_shared::health_metrics::calculate_tdee;
use fitlog_shared::types::{EnergyEstimateResponse, EstimateRequest, EstimateResponse};
use fitlog_shared::{BmrOrigin, BmrSource, BodyProfile};
use tracing::info;

const ENERGY_UNIT: &str = "kcal";

/// Build the BMR/TDEE pair for a resolved lookup
///
/// A fresh computation for a profile that was missing age or sex is
/// reported as `Defaulted`, since the cache only ever sees the filled-in
/// profile.
pub(crate) fn energy_response(profile: &BodyProfile, lookup: BmrLookup) -> EnergyEstimateResponse {
    let activity = profile.activity_level.unwrap_or_default();
    let origin = match (lookup.origin, profile.bmr_source()) {
        (BmrOrigin::Computed, BmrSource::Partial { .. }) => BmrOrigin::Defaulted,
        (origin, _) => origin,
    };

    EnergyEstimateResponse {
        bmr: lookup.bmr,
        tdee: calculate_tdee(f64::from(lookup.bmr), activity),
        activity_level: activity.as_str().to_string(),
        origin,
        unit: ENERGY_UNIT.to_string(),
    }
}

/// Routes estimator requests to the service that handles them
pub struct EstimateService;

impl EstimateService {
    pub fn handle(state: &AppState, request: EstimateRequest) -> ServiceResult<EstimateResponse> {
        Self::handle_on(state, request, Utc::now().date_naive())
    }

    /// Like [`handle`](Self::handle) with a fixed "today" for age calculation
    pub fn handle_on(
        state: &AppState,
        request: EstimateRequest,
        today: NaiveDate,
    ) -> ServiceResult<EstimateResponse> {
        match request {
            EstimateRequest::WeightLog(input) => {
                WeightService::estimate_after_log(state, &input, today).map(EstimateResponse::Energy)
            }
            EstimateRequest::Display(input) => {
                ActivityService::energy_summary(state, &input, today).map(EstimateResponse::Energy)
            }
            EstimateRequest::BodyFat(input) => {
                ActivityService::body_fat_estimate(state, &input, today)
                    .map(EstimateResponse::BodyFat)
            }
            EstimateRequest::Steps(req) => {
                StepService::estimate(state, &req).map(EstimateResponse::Steps)
            }
            EstimateRequest::ClearCache { profile: None } => {
                let removed = state.bmr_cache().clear();
                Ok(EstimateResponse::CacheCleared { removed })
            }
            EstimateRequest::ClearCache {
                profile: Some(input),
            } => {
                let profile = ProfileService::body_profile(&input, today, false)?;
                let cache = state.bmr_cache();
                let removed = cache.clear_for_profile(&profile.with_defaults(cache.defaults()));
                info!(removed, "Cleared cached estimate for profile");
                Ok(EstimateResponse::CacheCleared {
                    removed: usize::from(removed),
                })
            }
        }
    }
}
