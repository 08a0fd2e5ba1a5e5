//! Application state management
//!
//! Shared resources every estimate request needs: configuration and the
//! BMR cache. Built once at startup and cloned cheaply into callers.

use crate::cache::BmrCache;
use crate::config::AppConfig;
use std::sync::Arc;

/// Shared application state
///
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `bmr_cache`: One cache per state; clones share it
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Memoized BMR estimates shared by the logging and display paths
    pub bmr_cache: Arc<BmrCache>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: AppConfig) -> Self {
        let bmr_cache = BmrCache::with_method(config.estimates.bmr_method, config.default_profile());

        Self {
            config: Arc::new(config),
            bmr_cache: Arc::new(bmr_cache),
        }
    }

    /// Get a reference to the BMR cache
    #[inline]
    pub fn bmr_cache(&self) -> &BmrCache {
        &self.bmr_cache
    }

    /// Whether service input is validated before estimating
    #[inline]
    pub fn validates_inputs(&self) -> bool {
        self.config.estimates.validate_inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_shared::{BiologicalSex, BodyProfile};

    #[test]
    fn test_clones_share_the_cache() {
        let state = AppState::new(AppConfig::default());
        let cloned = state.clone();

        let profile = BodyProfile::new()
            .with_weight_kg(70.0)
            .with_height_cm(175.0)
            .with_age_years(30)
            .with_sex(BiologicalSex::Male);
        state.bmr_cache().get_consistent_bmr(&profile);

        assert!(cloned.bmr_cache().contains(&profile));
        assert!(Arc::ptr_eq(&state.bmr_cache, &cloned.bmr_cache));
    }

    #[test]
    fn test_cache_uses_configured_defaults() {
        let mut config = AppConfig::default();
        config.defaults.age_years = 50;
        let state = AppState::new(config);
        assert_eq!(state.bmr_cache().defaults().age_years, 50);
    }
}
