//! Query fragment construction.
//!
//! The E&P service uses OData-style `$select` / `$filter` options. Fragments
//! are emitted already percent-encoded so they can be appended to a URL
//! without further escaping.

use std::borrow::Cow;

use crate::error::{RefDataError, Result};

/// Prefix of a column-selection fragment (`&$select=`).
pub const SELECT_PREFIX: &str = "&%24select=";

/// Separator between selected columns (`,`).
pub const COLUMN_SEPARATOR: &str = "%2C";

fn is_plain_identifier(column: &str) -> bool {
    !column.is_empty()
        && column
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Build the `&$select=col1,col2,...` fragment for `columns`.
///
/// # Errors
///
/// Returns [`RefDataError::InvalidArgument`] when `columns` is empty or a
/// column name contains anything other than ASCII letters, digits and `_`.
///
/// # Example
///
/// ```
/// use refdata::core::query::select_fragment;
///
/// let fragment = select_fragment(&["fie_id", "field_name"]).unwrap();
/// assert_eq!(fragment, "&%24select=fie_id%2Cfield_name");
/// ```
pub fn select_fragment<S: AsRef<str>>(columns: &[S]) -> Result<String> {
    if columns.is_empty() {
        return Err(RefDataError::InvalidArgument(
            "column selection requires at least one column".to_string(),
        ));
    }

    if let Some(bad) = columns.iter().map(AsRef::as_ref).find(|c| !is_plain_identifier(c)) {
        return Err(RefDataError::InvalidArgument(format!(
            "column name {bad:?} is not a plain identifier"
        )));
    }

    let joined = columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);
    Ok(format!("{SELECT_PREFIX}{joined}"))
}

/// Percent-encode an identifier for interpolation into a URL.
///
/// Unreserved characters pass through, so numeric and alphanumeric ids are
/// emitted unchanged.
#[must_use]
pub fn encode_id(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Validate a caller-supplied identifier and return it trimmed.
///
/// # Errors
///
/// Returns [`RefDataError::InvalidArgument`] for an empty identifier.
pub fn require_id<'a>(what: &str, id: &'a str) -> Result<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(RefDataError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_has_no_separator() {
        assert_eq!(select_fragment(&["fie_id"]).unwrap(), "&%24select=fie_id");
    }

    #[test]
    fn columns_are_joined_without_trailing_separator() {
        let columns = ["fie_id", "field_name", "prod_status"];
        let fragment = select_fragment(&columns).unwrap();

        assert!(fragment.starts_with(SELECT_PREFIX));
        assert!(!fragment.ends_with(COLUMN_SEPARATOR));
        assert_eq!(fragment.matches(COLUMN_SEPARATOR).count(), columns.len() - 1);
        assert_eq!(fragment, "&%24select=fie_id%2Cfield_name%2Cprod_status");
    }

    #[test]
    fn every_column_appears_in_order() {
        let columns: Vec<String> = (0..12).map(|i| format!("col_{i}")).collect();
        let fragment = select_fragment(&columns).unwrap();
        let body = fragment.strip_prefix(SELECT_PREFIX).unwrap();
        let parts: Vec<&str> = body.split(COLUMN_SEPARATOR).collect();
        assert_eq!(parts, columns.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn empty_selection_is_rejected() {
        let empty: [&str; 0] = [];
        let err = select_fragment(&empty).unwrap_err();
        assert!(matches!(err, RefDataError::InvalidArgument(_)));
    }

    #[test]
    fn reserved_characters_are_rejected() {
        for bad in ["a,b", "a&b", "", "a b", "$top"] {
            let err = select_fragment(&[bad]).unwrap_err();
            assert!(matches!(err, RefDataError::InvalidArgument(_)), "{bad:?}");
        }
    }

    #[test]
    fn encode_id_keeps_plain_ids() {
        assert_eq!(encode_id("12345"), "12345");
        assert_eq!(encode_id("C100"), "C100");
        assert_eq!(encode_id("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn require_id_trims_and_rejects_blank() {
        assert_eq!(require_id("field id", " 42 ").unwrap(), "42");
        assert!(matches!(
            require_id("field id", "  ").unwrap_err(),
            RefDataError::InvalidArgument(_)
        ));
    }
}
