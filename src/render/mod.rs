//! Output rendering.

pub mod error;

pub use error::{ErrorFormat, render_error, render_error_json, render_simple};
