//! Fix suggestion database for refdata errors.
//!
//! Provides actionable guidance mapped to specific error types, including
//! the steps to take, context explanations, and prevention tips.

use super::TransportKind;

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Explanation of why this error occurred.
    pub context: String,

    /// Concrete steps to try, in order of preference.
    pub steps: Vec<String>,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with the required context.
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            steps: Vec::new(),
            prevention: None,
        }
    }

    /// Builder: adds steps.
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

// =============================================================================
// API status guidance
// =============================================================================

/// 400: the query string was rejected.
#[must_use]
pub fn bad_request_suggestions() -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            "The server could not understand your request, check the syntax for your query.",
        )
        .with_steps([
            "Compare the $filter and $select fragments with the vendor's column catalogue",
            "Inspect the server error message included with this error",
        ]),
    ]
}

/// 401: the credential was refused.
#[must_use]
pub fn unauthorized_suggestions() -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new("Login failed, please check your user name and password.")
            .with_steps([
                "Verify the key in the [credentials] section of config.toml",
                "Check REFDATA_CONNECT_API_KEY / REFDATA_ICONA_KEY for stale values",
            ])
            .with_prevention("Rotate vendor keys in one place and reload the configuration."),
    ]
}

/// 403: authenticated without entitlement.
#[must_use]
pub fn forbidden_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        "You are not entitled to this data. The credential is valid but its \
         subscription does not cover this dataset.",
    )
    .with_steps(["Ask the vendor account owner to extend the entitlement"])]
}

/// 404: unknown endpoint or view.
#[must_use]
pub fn not_found_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        "The URL you requested could not be found or you have an invalid view name.",
    )
    .with_steps(["List the available views and check the requested name"])]
}

/// 500: vendor-side failure.
#[must_use]
pub fn server_error_suggestions() -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            "The server encountered an unexpected condition which prevented it \
             from fulfilling the request.",
        )
        .with_steps(["Retry the request later"])
        .with_prevention("If this persists, please contact customer care."),
    ]
}

/// Any status without dedicated handling.
#[must_use]
pub fn unexpected_status_suggestions(status: u16) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(format!(
        "The vendor answered with HTTP {status}, which this client does not classify. \
         The server error message is included when the response carried one."
    ))]
}

/// 200 with a non-JSON payload.
#[must_use]
pub fn wrong_content_type_suggestions(content_type: Option<&str>) -> Vec<FixSuggestion> {
    let received = content_type.unwrap_or("no content type");
    vec![FixSuggestion::new(format!(
        "Unsupported content type received: {received}. The vendor only returns \
         data as application/json; an HTML page usually means a proxy or login portal \
         intercepted the request."
    ))
    .with_steps(["Check proxy settings between this host and the vendor"])]
}

// =============================================================================
// Transport guidance
// =============================================================================

/// Network-level failures.
#[must_use]
pub fn transport_suggestions(kind: TransportKind, message: &str) -> Vec<FixSuggestion> {
    let context = match kind {
        TransportKind::Timeout => format!(
            "The request timed out before the vendor answered ({message})."
        ),
        TransportKind::Connect => format!(
            "Could not connect to the vendor ({message}). DNS, firewall or TLS \
             interception are the usual causes."
        ),
        TransportKind::Body => format!("The response body could not be read ({message})."),
        TransportKind::Other => format!("An unexpected error occurred: {message}"),
    };

    let suggestion = FixSuggestion::new(context);
    match kind {
        TransportKind::Timeout => vec![
            suggestion
                .with_steps(["Raise general.timeout_seconds or REFDATA_TIMEOUT"])
                .with_prevention("Large view listings can take longer than the default timeout."),
        ],
        TransportKind::Connect => vec![suggestion.with_steps([
            "Check network connectivity to the vendor host",
            "Check HTTPS_PROXY if a corporate proxy is required",
        ])],
        TransportKind::Body | TransportKind::Other => vec![suggestion],
    }
}

// =============================================================================
// Configuration guidance
// =============================================================================

/// Missing vendor credential.
#[must_use]
pub fn auth_not_configured_suggestions(vendor: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(format!(
        "No credential found for {vendor}. Each vendor client needs its own key."
    ))
    .with_steps([
        "Add the key to the [credentials] section of config.toml",
        "Or export REFDATA_CONNECT_API_KEY / REFDATA_ICONA_KEY",
    ])]
}

/// Credential that cannot be sent as a header.
#[must_use]
pub fn auth_invalid_suggestions(vendor: &str, reason: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(format!(
        "The credential for {vendor} cannot be sent: {reason}. Keys must be \
         printable ASCII without line breaks."
    ))
    .with_prevention("Copy keys without surrounding whitespace or quotes.")]
}

/// Broken config file.
#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(format!(
        "The configuration file at {path} is not valid TOML: {message}"
    ))
    .with_steps([format!("Fix or remove {path}")])]
}

/// Out-of-range config value.
#[must_use]
pub fn config_invalid_suggestions(key: &str, value: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(format!(
        "The value '{value}' for '{key}' is invalid: {message}"
    ))]
}
