//! Error rendering for refdata.
//!
//! Classified errors render either as plain text for people (code, message,
//! server response, guidance) or as structured JSON for machines.

use serde::Serialize;

use crate::error::{FixSuggestion, RefDataError};

/// Width human output is wrapped at.
const WRAP_WIDTH: usize = 72;

/// How an error should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorFormat {
    /// Multi-line text with guidance.
    #[default]
    Human,
    /// Structured JSON.
    Json,
}

impl ErrorFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Render `error` in `format`. `pretty` only affects JSON.
#[must_use]
pub fn render_error(error: &RefDataError, format: ErrorFormat, pretty: bool) -> String {
    match format {
        ErrorFormat::Json => render_error_json(error, pretty),
        ErrorFormat::Human => render_human(error),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &RefDataError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error))
}

/// One-line rendering: `Error [CODE]: message`.
#[must_use]
pub fn render_simple(error: &RefDataError) -> String {
    format!("Error [{}]: {}", error.error_code(), error)
}

// =============================================================================
// Human Rendering
// =============================================================================

fn render_human(error: &RefDataError) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines = vec![render_simple(error)];

    if let Some(body) = error.server_body() {
        lines.push(String::new());
        lines.push("Server response:".to_string());
        lines.push(format!("  {body}"));
    }

    if let Some(first) = suggestions.first() {
        lines.push(String::new());
        lines.push(format!("{}:", error.category()));
        lines.extend(wrap_text(&first.context, WRAP_WIDTH).into_iter().map(|l| format!("  {l}")));
    }

    let steps = numbered_steps(&suggestions);
    if !steps.is_empty() {
        lines.push(String::new());
        lines.push("How to fix:".to_string());
        lines.extend(steps);
    }

    if let Some(prevention) = suggestions.iter().find_map(|s| s.prevention.as_deref()) {
        lines.push(String::new());
        lines.push("Prevention:".to_string());
        lines.extend(wrap_text(prevention, WRAP_WIDTH).into_iter().map(|l| format!("  {l}")));
    }

    lines.join("\n")
}

fn numbered_steps(suggestions: &[FixSuggestion]) -> Vec<String> {
    suggestions
        .iter()
        .flat_map(|s| s.steps.iter())
        .enumerate()
        .map(|(i, step)| format!("  {}. {step}", i + 1))
        .collect()
}

/// Greedy word wrap.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

// =============================================================================
// JSON Rendering
// =============================================================================

/// JSON representation of an error for machine consumption.
#[derive(Serialize)]
struct ErrorJson {
    error_code: &'static str,
    category: String,
    message: String,
    is_transient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_body: Option<serde_json::Value>,
    suggestions: Vec<SuggestionJson>,
}

#[derive(Serialize)]
struct SuggestionJson {
    context: String,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &RefDataError) -> Self {
        Self {
            error_code: error.error_code(),
            category: error.category().to_string(),
            message: error.to_string(),
            is_transient: error.is_transient(),
            status: error.status(),
            url: error.url().map(String::from),
            // Embed JSON bodies as JSON, anything else as a string.
            server_body: error.server_body().map(|body| {
                serde_json::from_str(body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
            }),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    context: s.context,
                    steps: s.steps,
                    prevention: s.prevention,
                })
                .collect(),
        }
    }
}
