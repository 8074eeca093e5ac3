//! Test utilities for refdata.
//!
//! Shared fixtures, client factories and a temp-directory helper for unit
//! and integration tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use refdata::test_utils::*;
//!
//! let client = make_test_eandp_client(&server.uri());
//! let body = make_test_field_elements_json();
//! let dir = TestDir::new();
//! dir.create_file("config.toml", &make_test_config_toml());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::core::credentials::{EandpCredentials, IconaCredentials};
use crate::providers::{ClientOptions, EandpClient, IconaClient};

/// Connect API key used by test clients.
pub const TEST_CONNECT_API_KEY: &str = "test-connect-key";

/// ICONA key used by test clients.
pub const TEST_ICONA_KEY: &str = "test-icona-key";

// =============================================================================
// Client Factories
// =============================================================================

/// E&P client pointed at `base_url`, sequential view fetching.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn make_test_eandp_client(base_url: &str) -> EandpClient {
    make_test_eandp_client_with(base_url, ClientOptions::default())
}

/// E&P client pointed at `base_url` with explicit options.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn make_test_eandp_client_with(base_url: &str, options: ClientOptions) -> EandpClient {
    let credentials = EandpCredentials::new(TEST_CONNECT_API_KEY).expect("test key is valid");
    EandpClient::with_options(&credentials, options)
        .expect("Failed to build test E&P client")
        .with_base_url(base_url)
}

/// ICONA client pointed at `base_url`.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn make_test_icona_client(base_url: &str) -> IconaClient {
    let credentials = IconaCredentials::new(TEST_ICONA_KEY).expect("test key is valid");
    IconaClient::new(&credentials)
        .expect("Failed to build test ICONA client")
        .with_base_url(base_url)
}

// =============================================================================
// Response Fixtures
// =============================================================================

/// Field header body with two fields.
#[must_use]
pub fn make_test_field_elements_json() -> Value {
    json!({
        "elements": [
            {
                "fie_id": 12345,
                "field_name": "Troll",
                "country_names": "Norway",
                "basin_name": "North Sea",
                "ons_offshore": "Offshore",
                "latitude_dec_deg": 60.64,
                "longitude_dec_deg": 3.72
            },
            {
                "fie_id": 12346,
                "field_name": "Oseberg",
                "country_names": "Norway",
                "basin_name": "North Sea",
                "ons_offshore": "Offshore",
                "latitude_dec_deg": 60.49,
                "longitude_dec_deg": 2.83
            }
        ]
    })
}

/// Reservoir body with one reservoir.
#[must_use]
pub fn make_test_reservoir_elements_json() -> Value {
    json!({
        "elements": [
            {
                "resv_id": 987,
                "reservoir_unit_name": "Sognefjord",
                "field_name": "Troll",
                "lithologies": "Sandstone",
                "porosity_avg_pct": 28.0,
                "permeab_max_md": null
            }
        ]
    })
}

/// Views listing naming `names` in order.
#[must_use]
pub fn make_test_views_listing_json(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|name| json!({ "name": name })).collect())
}

/// View detail for `view_name` holding `elements`.
#[must_use]
pub fn make_test_view_detail_json(view_name: &str, elements: Value) -> Value {
    json!({ "view_name": view_name, "Elements": elements })
}

/// Company search body.
#[must_use]
pub fn make_test_company_json(name: &str) -> Value {
    json!({ "name": name })
}

/// Parent/child tree body: the company and one subsidiary.
#[must_use]
pub fn make_test_parent_child_tree_json() -> Value {
    json!([
        { "company_id": "C100", "name": "Acme", "parent_id": null },
        { "company_id": "C101", "name": "Acme Upstream", "parent_id": "C100" }
    ])
}

/// Config file with both keys and non-default transport settings.
#[must_use]
pub fn make_test_config_toml() -> String {
    format!(
        r#"[general]
timeout_seconds = 10
view_concurrency = 2

[credentials]
connect_api_key = "{TEST_CONNECT_API_KEY}"
icona_key = "{TEST_ICONA_KEY}"
"#
    )
}

// =============================================================================
// Temp Directory Utilities
// =============================================================================

/// A temporary directory for tests with automatic cleanup.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content, creating parents as needed.
    /// Returns its full path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
