//! Estimate cache statistics

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;

pub const HIT_TOTAL: &str = "fitlog_bmr_cache_hit_total";
pub const MISS_TOTAL: &str = "fitlog_bmr_cache_miss_total";
pub const INVALIDATION_TOTAL: &str = "fitlog_bmr_cache_invalidation_total";

/// Hit/miss accounting for one cache instance
///
/// Counters are per instance; the `metrics` counters emitted alongside
/// aggregate across every cache in the process.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!(HIT_TOTAL).increment(1);
    }

    /// A miss is always followed by exactly one computation and insert
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!(MISS_TOTAL).increment(1);
    }

    pub fn record_invalidations(&self, removed: u64) {
        if removed == 0 {
            return;
        }
        self.invalidations.fetch_add(removed, Ordering::Relaxed);
        counter!(INVALIDATION_TOTAL).increment(removed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);

        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();

        assert_eq!(stats.hits(), 3);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 0.75);
    }

    #[test]
    fn test_zero_invalidations_are_ignored() {
        let stats = CacheStats::new();
        stats.record_invalidations(0);
        stats.record_invalidations(4);
        assert_eq!(stats.invalidations(), 4);
    }
}
