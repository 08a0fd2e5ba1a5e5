//! Fitlog Estimator Backend Library
//!
//! This library exposes the estimator modules for use in tests and the
//! `fitlog-estimator` binary.

pub mod cache;
pub mod config;
pub mod error;
pub mod runner;
pub mod services;
pub mod state;
pub mod telemetry;
