//! HTTP client utilities.
//!
//! Every vendor call goes through [`Session::get_classified`]: exactly one
//! GET, then the response is classified into success or one of the
//! [`RefDataError`] API/transport variants. There are no retries.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;

use super::credentials::{ACCEPT_JSON, Credentials};
use super::vendor::Vendor;
use crate::error::{RefDataError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A response that has been read off the wire but not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// URL the request was issued against.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Body text.
    pub body: String,
}

impl RawResponse {
    /// Whether the content type announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        is_json_content_type(self.content_type.as_deref())
    }

    /// Deserialize the body.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::ParseResponse`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| RefDataError::ParseResponse {
            url: self.url.clone(),
            message: e.to_string(),
        })
    }
}

/// Whether a `Content-Type` value denotes JSON.
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains(ACCEPT_JSON))
}

/// Normalize a JSON-typed error body for inclusion in an error.
///
/// Valid JSON is re-serialized compactly; anything else is kept as trimmed
/// text. Blank bodies yield `None`.
fn error_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str::<serde_json::Value>(trimmed)
            .map_or_else(|_| trimmed.to_string(), |value| value.to_string()),
    )
}

/// Classify a response.
///
/// - 200 with a JSON content type is success.
/// - 200 with any other content type is [`RefDataError::WrongContentType`].
/// - Any other status maps through [`RefDataError::from_status`]. The server
///   body is attached only when the error response is JSON-typed.
///
/// # Errors
///
/// Returns the classified error for every non-success outcome.
pub fn classify(response: RawResponse) -> Result<RawResponse> {
    let is_json = response.is_json();

    if response.status == 200 {
        if is_json {
            return Ok(response);
        }
        return Err(RefDataError::WrongContentType {
            url: response.url,
            content_type: response.content_type,
        });
    }

    let body = if is_json {
        error_body(&response.body)
    } else {
        None
    };
    Err(RefDataError::from_status(response.url, response.status, body))
}

/// Build a configured HTTP client carrying `headers` on every request.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration, headers: HeaderMap) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| RefDataError::Config(format!("failed to build HTTP client: {e}")))
}

/// An HTTP client bound to one vendor's credential set.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    vendor: Vendor,
    timeout: Duration,
}

impl Session {
    /// Create a session sending `credentials`' headers with every request.
    ///
    /// # Errors
    ///
    /// Returns error if the credential headers are invalid or the client
    /// cannot be built.
    pub fn new(credentials: &dyn Credentials, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout, credentials.headers()?)?;
        Ok(Self {
            client,
            vendor: credentials.vendor(),
            timeout,
        })
    }

    /// Vendor this session talks to.
    #[must_use]
    pub const fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET and classify the outcome.
    ///
    /// `params` are appended to any query string already present in `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RefDataError::Transport`] when the request raises, or the
    /// classified API error for a non-success response.
    pub async fn get_classified(&self, url: &str, params: &[(&str, &str)]) -> Result<RawResponse> {
        tracing::debug!(vendor = self.vendor.slug(), %url, "GET");

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| {
            let err = RefDataError::transport(url, &e);
            tracing::warn!(vendor = self.vendor.slug(), %url, error = %err, "request failed");
            err
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|e| RefDataError::transport(url, &e))?;

        let raw = RawResponse {
            url: url.to_string(),
            status,
            content_type,
            body,
        };

        match classify(raw) {
            Ok(ok) => {
                tracing::debug!(vendor = self.vendor.slug(), %url, status, bytes = ok.body.len(), "response ok");
                Ok(ok)
            }
            Err(err) => {
                tracing::warn!(
                    vendor = self.vendor.slug(),
                    %url,
                    status,
                    code = err.error_code(),
                    "classified failure"
                );
                Err(err)
            }
        }
    }
}
