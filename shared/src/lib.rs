//! Fitlog Shared Library
//!
//! Pure metabolic estimate math, the profile types it consumes, and the
//! wire types shared by the backend estimator and the WASM bindings.

pub mod errors;
pub mod health_metrics;
pub mod profile;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use profile::*;
pub use types::*;
pub use units::*;
