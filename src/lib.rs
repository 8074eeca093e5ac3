//! refdata - oil-and-gas reference data client
//!
//! Typed clients for two vendor REST APIs: the International E&P service
//! (field headers, reservoirs, reservoir views) and the ICONA company
//! database. Every operation returns a [`core::Table`].

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod core;
pub mod error;
pub mod providers;
pub mod render;
pub mod storage;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::table::Table;
pub use error::{RefDataError, Result};
pub use providers::{ClientOptions, EandpClient, IconaClient, VendorClient};
