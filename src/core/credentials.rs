//! Vendor credential sets.
//!
//! Each vendor expects its own header layout. The two credential types share
//! only the [`Credentials`] capability: turn an opaque key into the fixed
//! header set sent with every request.

use std::fmt;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use super::vendor::Vendor;
use crate::error::{RefDataError, Result};

/// Client identity string both vendors were provisioned against.
pub const CLIENT_IDENTITY: &str = "PostmanRuntime/7.26.8";

/// Media type requested from both vendors.
pub const ACCEPT_JSON: &str = "application/json";

/// Header carrying the ICONA key.
pub const ICONA_AUTH_HEADER: &str = "icona-auth-key";

/// Anything that can produce the fixed header set for one vendor.
pub trait Credentials: Send + Sync {
    /// Vendor these credentials belong to.
    fn vendor(&self) -> Vendor;

    /// Headers sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::AuthInvalid`] when the key is not a valid
    /// header value.
    fn headers(&self) -> Result<HeaderMap>;
}

fn secret_value(vendor: Vendor, key: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(key).map_err(|e| RefDataError::AuthInvalid {
        vendor: vendor.display_name().to_string(),
        reason: e.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_IDENTITY));
    headers
}

fn non_empty(vendor: Vendor, key: String) -> Result<String> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(RefDataError::AuthNotConfigured {
            vendor: vendor.display_name().to_string(),
        });
    }
    Ok(key)
}

// =============================================================================
// E&P (Connect API key)
// =============================================================================

/// Connect API key for the International E&P service.
///
/// Sent verbatim in the `Authorization` header.
#[derive(Clone)]
pub struct EandpCredentials {
    api_key: String,
}

impl EandpCredentials {
    /// Wrap a Connect API key.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::AuthNotConfigured`] for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: non_empty(Vendor::Eandp, api_key.into())?,
        })
    }
}

impl Credentials for EandpCredentials {
    fn vendor(&self) -> Vendor {
        Vendor::Eandp
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = base_headers();
        headers.insert(AUTHORIZATION, secret_value(Vendor::Eandp, &self.api_key)?);
        Ok(headers)
    }
}

impl fmt::Debug for EandpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EandpCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// ICONA
// =============================================================================

/// ICONA key, sent in the `icona-auth-key` header.
#[derive(Clone)]
pub struct IconaCredentials {
    key: String,
}

impl IconaCredentials {
    /// Wrap an ICONA key.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::AuthNotConfigured`] for a blank key.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            key: non_empty(Vendor::Icona, key.into())?,
        })
    }
}

impl Credentials for IconaCredentials {
    fn vendor(&self) -> Vendor {
        Vendor::Icona
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = base_headers();
        headers.insert(
            HeaderName::from_static(ICONA_AUTH_HEADER),
            secret_value(Vendor::Icona, &self.key)?,
        );
        Ok(headers)
    }
}

impl fmt::Debug for IconaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconaCredentials")
            .field("key", &"<redacted>")
            .finish()
    }
}
