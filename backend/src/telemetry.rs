//! Tracing subscriber and metric descriptions
//!
//! Logs go to stderr; stdout carries estimator responses.

use std::sync::Once;

use anyhow::{anyhow, Result};
use metrics::{describe_counter, Unit};
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::cache::{HIT_TOTAL, INVALIDATION_TOTAL, MISS_TOTAL};
use crate::config::{AppConfig, LogFormat, LoggingConfig};

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured filter. Production always logs JSON
/// (better for log aggregation).
pub fn init(logging: &LoggingConfig) -> Result<()> {
    describe_metrics();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .map_err(|err| anyhow!("invalid log filter {:?}: {err}", logging.filter))?;

    let format = if AppConfig::is_production() {
        LogFormat::Json
    } else {
        logging.format
    };

    let fmt_layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Register descriptions for the cache counters with whatever recorder is
/// installed
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(HIT_TOTAL, Unit::Count, "Total number of BMR cache hits.");
        describe_counter!(MISS_TOTAL, Unit::Count, "Total number of BMR cache misses.");
        describe_counter!(
            INVALIDATION_TOTAL,
            Unit::Count,
            "Total number of BMR cache entries removed by explicit clears."
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_metrics_is_idempotent() {
        describe_metrics();
        describe_metrics();
        assert!(METRIC_DESCRIPTIONS.is_completed());
    }
}
