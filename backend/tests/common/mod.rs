//! Common test utilities for integration tests
//!
//! Drives the estimator through its JSON line interface, the same way the
//! binary does.

use fitlog_backend::{config::AppConfig, runner, state::AppState};
use serde_json::Value;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Estimator with default configuration
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Send one request and parse the response line
    pub fn send(&self, request: Value) -> Value {
        let line = runner::handle_line(&self.state, &request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }
}

/// Create test configuration
pub fn test_config() -> AppConfig {
    AppConfig::default()
}
