//! Fitlog Estimator
//!
//! Serves BMR/TDEE, body fat and step calorie estimates over stdin/stdout,
//! one JSON request per line.
//!
//! ## Architecture
//!
//! - Runner: line framing and JSON (de)serialization
//! - Services: input conversion, validation and path selection
//! - Cache: memoized BMR shared by the logging and display paths

use std::io;

use anyhow::Result;
use fitlog_backend::{config::AppConfig, runner, state::AppState, telemetry};
use tracing::info;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    telemetry::init(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        bmr_method = ?config.estimates.bmr_method,
        validate_inputs = config.estimates.validate_inputs,
        "Starting Fitlog estimator"
    );

    let state = AppState::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    runner::run(&state, stdin.lock(), stdout.lock())?;

    let stats = state.bmr_cache().stats();
    info!(
        hits = stats.hits(),
        misses = stats.misses(),
        hit_ratio = stats.hit_ratio(),
        entries = state.bmr_cache().len(),
        "Estimator shutdown complete"
    );
    Ok(())
}
