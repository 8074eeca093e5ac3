//! Vendor-specific query clients.
//!
//! Each vendor has its own submodule. The clients share no state; the only
//! common ground is the [`VendorClient`] capability.

pub mod eandp;
pub mod icona;

use std::time::Duration;

use crate::core::http::{DEFAULT_TIMEOUT, Session};
use crate::core::vendor::Vendor;
use crate::storage::config::ResolvedConfig;

pub use eandp::EandpClient;
pub use icona::IconaClient;

/// A client that issues classified GETs against one vendor's API root.
pub trait VendorClient {
    /// Vendor this client talks to.
    fn vendor(&self) -> Vendor;

    /// API root every endpoint is built from.
    fn base_url(&self) -> &str;

    /// Session carrying the vendor's credential headers.
    fn session(&self) -> &Session;

    /// Absolute URL of `path` under [`Self::base_url`].
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Transport options shared by both clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum view detail requests in flight (E&P views only).
    pub view_concurrency: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            view_concurrency: 1,
        }
    }
}

impl ClientOptions {
    /// Options taken from resolved configuration.
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            timeout: config.timeout,
            view_concurrency: config.view_concurrency,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the view fetch concurrency (values below 1 mean 1).
    #[must_use]
    pub const fn with_view_concurrency(mut self, concurrency: usize) -> Self {
        self.view_concurrency = if concurrency == 0 { 1 } else { concurrency };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert_eq!(options.view_concurrency, 1);
    }

    #[test]
    fn zero_concurrency_means_sequential() {
        assert_eq!(
            ClientOptions::default().with_view_concurrency(0).view_concurrency,
            1
        );
    }

    #[test]
    fn options_follow_config() {
        let config = ResolvedConfig {
            timeout: Duration::from_secs(5),
            view_concurrency: 3,
            ..ResolvedConfig::default()
        };
        let options = ClientOptions::from_config(&config);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.view_concurrency, 3);
    }
}
