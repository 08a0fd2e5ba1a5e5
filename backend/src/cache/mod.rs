//! BMR estimate cache
//!
//! Memoizes the BMR resolved for a profile signature so every path that
//! asks about the same profile (weight logging, activity display) gets the
//! same number. Entries have no TTL and stay until explicitly cleared.
//!
//! The cache is an ordinary value owned by whoever builds it; `AppState`
//! holds one behind an `Arc`. Lookup and insert happen under a single lock,
//! so a signature is resolved at most once even with concurrent callers.

mod keys;
mod stats;

pub use keys::bmr_cache_key;
pub use stats::{CacheStats, HIT_TOTAL, INVALIDATION_TOTAL, MISS_TOTAL};

use std::collections::HashMap;

use fitlog_shared::{
    round_kcal, BmrFormula, BmrMethod, BmrOrigin, BmrSource, BodyProfile, DefaultProfile,
};
use parking_lot::Mutex;
use tracing::{debug, info};

/// A resolved BMR and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmrLookup {
    pub bmr: i32,
    pub origin: BmrOrigin,
}

/// Memoizing BMR resolver
pub struct BmrCache<F = BmrMethod> {
    formula: F,
    defaults: DefaultProfile,
    entries: Mutex<HashMap<String, i32>>,
    stats: CacheStats,
}

impl BmrCache<BmrMethod> {
    /// Cache computing through the given BMR equation
    pub fn with_method(method: BmrMethod, defaults: DefaultProfile) -> Self {
        Self::new(method, defaults)
    }
}

impl Default for BmrCache<BmrMethod> {
    fn default() -> Self {
        Self::with_method(BmrMethod::default(), DefaultProfile::default())
    }
}

impl<F: BmrFormula> BmrCache<F> {
    pub fn new(formula: F, defaults: DefaultProfile) -> Self {
        Self {
            formula,
            defaults,
            entries: Mutex::new(HashMap::new()),
            stats: CacheStats::new(),
        }
    }

    /// Defaults used for missing age/sex
    pub fn defaults(&self) -> &DefaultProfile {
        &self.defaults
    }

    /// Rounded BMR for `profile`, computed at most once per signature
    pub fn get_consistent_bmr(&self, profile: &BodyProfile) -> i32 {
        self.lookup(profile).bmr
    }

    /// Like [`get_consistent_bmr`](Self::get_consistent_bmr), also reporting
    /// whether the value was cached or how it was resolved
    pub fn lookup(&self, profile: &BodyProfile) -> BmrLookup {
        let key = bmr_cache_key(profile);
        let mut entries = self.entries.lock();

        if let Some(&bmr) = entries.get(&key) {
            self.stats.record_hit();
            debug!(key = %key, bmr, "BMR cache hit");
            return BmrLookup {
                bmr,
                origin: BmrOrigin::Cached,
            };
        }

        self.stats.record_miss();
        let (bmr, origin) = self.resolve(profile);
        entries.insert(key.clone(), bmr);
        debug!(key = %key, bmr, ?origin, "BMR cache miss");

        BmrLookup { bmr, origin }
    }

    /// Logging path: fill default age/sex, then resolve through the cache
    pub fn bmr_for_logging(&self, profile: &BodyProfile) -> i32 {
        self.lookup_for_logging(profile).bmr
    }

    /// Display path: same defaulting as logging so both always agree
    pub fn bmr_for_display(&self, profile: &BodyProfile) -> i32 {
        self.lookup_for_display(profile).bmr
    }

    pub fn lookup_for_logging(&self, profile: &BodyProfile) -> BmrLookup {
        self.lookup(&profile.with_defaults(&self.defaults))
    }

    pub fn lookup_for_display(&self, profile: &BodyProfile) -> BmrLookup {
        self.lookup(&profile.with_defaults(&self.defaults))
    }

    /// Drop every entry
    pub fn clear(&self) -> usize {
        let removed = {
            let mut entries = self.entries.lock();
            let removed = entries.len();
            entries.clear();
            removed
        };
        self.stats.record_invalidations(removed as u64);
        info!(removed, "BMR cache cleared");
        removed
    }

    /// Drop the entry for exactly this profile's signature, if present
    pub fn clear_for_profile(&self, profile: &BodyProfile) -> bool {
        let key = bmr_cache_key(profile);
        let removed = self.entries.lock().remove(&key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            info!(key = %key, "BMR cache entry cleared");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains(&self, profile: &BodyProfile) -> bool {
        self.entries.lock().contains_key(&bmr_cache_key(profile))
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn resolve(&self, profile: &BodyProfile) -> (i32, BmrOrigin) {
        match profile.bmr_source() {
            BmrSource::Stored(stored) => (round_kcal(stored), BmrOrigin::Stored),
            BmrSource::Complete {
                weight_kg,
                height_cm,
                age_years,
                sex,
            } => {
                let bmr = self.formula.estimate(weight_kg, height_cm, age_years, sex);
                (round_kcal(bmr), BmrOrigin::Computed)
            }
            BmrSource::Partial {
                weight_kg,
                height_cm,
                age_years,
                sex,
            } => {
                let bmr = self.formula.estimate(
                    weight_kg,
                    height_cm,
                    age_years.unwrap_or(self.defaults.age_years),
                    sex.unwrap_or(self.defaults.sex),
                );
                (round_kcal(bmr), BmrOrigin::Defaulted)
            }
            BmrSource::Insufficient => (0, BmrOrigin::Insufficient),
        }
    }
}
