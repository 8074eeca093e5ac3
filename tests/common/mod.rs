//! Common helpers for integration tests.
//!
//! - `log_capture`: collects `tracing` events so tests can assert on them
//! - `logger`: phase-tagged progress output for long scenario tests
//! - `mock`: wiremock mounting shortcuts for the vendor endpoints

pub mod log_capture;
pub mod logger;
pub mod mock;
