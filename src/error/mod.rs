//! Error types for refdata.
//!
//! Uses `thiserror` for structured error types that classify every failed
//! vendor call instead of aborting the process.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into five main categories:
//! - **Transport**: the request itself failed (timeout, DNS, reset, unreadable body)
//! - **Api**: the vendor answered, but not with a usable JSON payload
//! - **Input**: a caller-supplied argument was rejected before any request
//! - **Configuration**: credentials or config file problems
//! - **Internal**: I/O and serialization failures
//!
//! Each error has a stable error code (e.g., `REFDATA-H404`) for programmatic handling.
//!
//! ## Fix Suggestions
//!
//! Each error type can provide actionable guidance via
//! [`RefDataError::fix_suggestions()`]. The API-level guidance mirrors the
//! messages the vendors document for each status code.

pub mod suggestions;

use std::fmt;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The network call raised before a status code was available.
    Transport,
    /// The vendor returned a non-success or non-JSON response.
    Api,
    /// A caller-supplied argument was invalid.
    Input,
    /// Credentials or configuration are missing or invalid.
    Configuration,
    /// Internal errors (I/O, serialization).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Transport => "Transport error",
            Self::Api => "API error",
            Self::Input => "Invalid input",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Transport => "T",
            Self::Api => "H",
            Self::Input => "I",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Transport failure kinds
// =============================================================================

/// What went wrong below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// The per-request timeout elapsed.
    Timeout,
    /// DNS resolution, TCP connect or TLS handshake failed.
    Connect,
    /// The response body could not be read.
    Body,
    /// Anything else reported by the HTTP stack.
    Other,
}

impl TransportKind {
    /// Classify a `reqwest` error.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect
        } else if err.is_body() || err.is_decode() {
            Self::Body
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

fn body_suffix(body: Option<&String>) -> String {
    body.map_or_else(String::new, |b| format!(": {b}"))
}

/// Main error type for refdata operations.
///
/// API-level variants carry the offending URL and, when the vendor sent a
/// JSON-typed error response, its body.
#[derive(Error, Debug)]
pub enum RefDataError {
    // ==========================================================================
    // Transport errors (Category: Transport)
    // ==========================================================================
    /// The network call itself raised.
    #[error("request to {url} failed ({kind}): {message}")]
    Transport {
        url: String,
        kind: TransportKind,
        message: String,
    },

    // ==========================================================================
    // API errors (Category: Api)
    // ==========================================================================
    /// Status 200, but the payload is not JSON.
    #[error("unsupported content type received from {url}: {}", .content_type.as_deref().unwrap_or("<missing>"))]
    WrongContentType {
        url: String,
        content_type: Option<String>,
    },

    /// Status 400: the server could not understand the query.
    #[error("bad request (400) for {url}{}", body_suffix(.body.as_ref()))]
    BadRequest { url: String, body: Option<String> },

    /// Status 401: login failed.
    #[error("unauthorized (401) for {url}{}", body_suffix(.body.as_ref()))]
    Unauthorized { url: String, body: Option<String> },

    /// Status 403: valid credentials without entitlement.
    #[error("forbidden (403) for {url}{}", body_suffix(.body.as_ref()))]
    Forbidden { url: String, body: Option<String> },

    /// Status 404: unknown resource or view name.
    #[error("not found (404): {url}{}", body_suffix(.body.as_ref()))]
    NotFound { url: String, body: Option<String> },

    /// Status 500: upstream failure.
    #[error("server error (500) for {url}{}", body_suffix(.body.as_ref()))]
    ServerError { url: String, body: Option<String> },

    /// Any other non-200 status.
    #[error("unexpected HTTP status {status} for {url}{}", body_suffix(.body.as_ref()))]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: Option<String>,
    },

    /// A successful response whose structure the caller cannot work with.
    #[error("failed to parse response from {url}: {message}")]
    ParseResponse { url: String, message: String },

    // ==========================================================================
    // Input errors (Category: Input)
    // ==========================================================================
    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// No credential is configured for the vendor.
    #[error("no credentials configured for {vendor}")]
    AuthNotConfigured { vendor: String },

    /// A credential could not be turned into a header value.
    #[error("invalid credential for {vendor}: {reason}")]
    AuthInvalid { vendor: String, reason: String },

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RefDataError {
    /// Build the classified error for a non-200 status.
    #[must_use]
    pub fn from_status(url: impl Into<String>, status: u16, body: Option<String>) -> Self {
        let url = url.into();
        match status {
            400 => Self::BadRequest { url, body },
            401 => Self::Unauthorized { url, body },
            403 => Self::Forbidden { url, body },
            404 => Self::NotFound { url, body },
            500 => Self::ServerError { url, body },
            _ => Self::UnexpectedStatus { url, status, body },
        }
    }

    /// Build a transport error from a `reqwest` failure.
    #[must_use]
    pub fn transport(url: impl Into<String>, err: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            kind: TransportKind::from_reqwest(err),
            message: err.to_string(),
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport { .. } => ErrorCategory::Transport,

            Self::WrongContentType { .. }
            | Self::BadRequest { .. }
            | Self::Unauthorized { .. }
            | Self::Forbidden { .. }
            | Self::NotFound { .. }
            | Self::ServerError { .. }
            | Self::UnexpectedStatus { .. }
            | Self::ParseResponse { .. } => ErrorCategory::Api,

            Self::InvalidArgument(_) => ErrorCategory::Input,

            Self::AuthNotConfigured { .. }
            | Self::AuthInvalid { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ErrorCategory::Configuration,

            Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `REFDATA-{category}{number}`. API errors reuse the HTTP status
    /// as their number.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "REFDATA-T001",

            Self::WrongContentType { .. } => "REFDATA-H200",
            Self::BadRequest { .. } => "REFDATA-H400",
            Self::Unauthorized { .. } => "REFDATA-H401",
            Self::Forbidden { .. } => "REFDATA-H403",
            Self::NotFound { .. } => "REFDATA-H404",
            Self::ServerError { .. } => "REFDATA-H500",
            Self::UnexpectedStatus { .. } => "REFDATA-H999",
            Self::ParseResponse { .. } => "REFDATA-H001",

            Self::InvalidArgument(_) => "REFDATA-I001",

            Self::AuthNotConfigured { .. } => "REFDATA-C001",
            Self::AuthInvalid { .. } => "REFDATA-C002",
            Self::ConfigParse { .. } => "REFDATA-C003",
            Self::ConfigInvalid { .. } => "REFDATA-C004",
            Self::Config(_) => "REFDATA-C099",

            Self::Io(_) => "REFDATA-X001",
            Self::Json(_) => "REFDATA-X002",
        }
    }

    /// HTTP status the vendor answered with, when there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::WrongContentType { .. } => Some(200),
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::ServerError { .. } => Some(500),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The request URL this error relates to.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::WrongContentType { url, .. }
            | Self::BadRequest { url, .. }
            | Self::Unauthorized { url, .. }
            | Self::Forbidden { url, .. }
            | Self::NotFound { url, .. }
            | Self::ServerError { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::ParseResponse { url, .. } => Some(url),
            _ => None,
        }
    }

    /// The JSON error body the vendor sent, if any.
    #[must_use]
    pub fn server_body(&self) -> Option<&str> {
        match self {
            Self::BadRequest { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::Forbidden { body, .. }
            | Self::NotFound { body, .. }
            | Self::ServerError { body, .. }
            | Self::UnexpectedStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Whether a later identical call has a reasonable chance of succeeding.
    ///
    /// The client itself never retries; this is a hint for callers.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ServerError { .. })
    }

    /// Returns actionable fix suggestions for this error.
    ///
    /// # Example
    ///
    /// ```
    /// use refdata::error::RefDataError;
    ///
    /// let err = RefDataError::from_status("https://example.test/x", 401, None);
    /// let suggestions = err.fix_suggestions();
    /// assert!(suggestions[0].context.contains("Login failed"));
    /// ```
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::Transport { kind, message, .. } => {
                suggestions::transport_suggestions(*kind, message)
            }
            Self::WrongContentType { content_type, .. } => {
                suggestions::wrong_content_type_suggestions(content_type.as_deref())
            }
            Self::BadRequest { .. } => suggestions::bad_request_suggestions(),
            Self::Unauthorized { .. } => suggestions::unauthorized_suggestions(),
            Self::Forbidden { .. } => suggestions::forbidden_suggestions(),
            Self::NotFound { .. } => suggestions::not_found_suggestions(),
            Self::ServerError { .. } => suggestions::server_error_suggestions(),
            Self::UnexpectedStatus { status, .. } => {
                suggestions::unexpected_status_suggestions(*status)
            }
            Self::ParseResponse { message, .. } => {
                vec![FixSuggestion::new(format!(
                    "The vendor answered with JSON of an unexpected shape: {message}. \
                     The API contract may have changed."
                ))]
            }
            Self::InvalidArgument(msg) => {
                vec![FixSuggestion::new(format!("The request was not sent: {msg}."))]
            }
            Self::AuthNotConfigured { vendor } => {
                suggestions::auth_not_configured_suggestions(vendor)
            }
            Self::AuthInvalid { vendor, reason } => {
                suggestions::auth_invalid_suggestions(vendor, reason)
            }
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::ConfigInvalid { key, value, message } => {
                suggestions::config_invalid_suggestions(key, value, message)
            }
            Self::Config(msg) => {
                vec![FixSuggestion::new(format!("Configuration error: {msg}"))]
            }
            Self::Io(err) => {
                vec![FixSuggestion::new(format!(
                    "I/O error: {err}. Check file permissions and available disk space."
                ))]
            }
            Self::Json(err) => {
                vec![FixSuggestion::new(format!(
                    "JSON error: {err}. The data may be corrupted or in an unexpected format."
                ))]
            }
        }
    }
}

/// Result type alias for refdata operations.
pub type Result<T> = std::result::Result<T, RefDataError>;

// =============================================================================
// Tests
// =============================================================================
