//! Tabular decoding of successful responses.
//!
//! The vendors occasionally answer a lookup with a body of a different shape
//! (for example an empty object when an id has no data). Callers treat "no
//! data" and "unexpected shape" alike, so decoding never fails: any shape
//! problem degrades to [`Table::empty`] and is logged.

use serde_json::Value;
use thiserror::Error;

use super::table::{Record, Table};

/// Why a body could not be turned into rows.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The body is not JSON at all.
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The top level is not an object.
    #[error("top level is {0}, expected an object")]
    NotAnObject(&'static str),
    /// The `elements` key is absent.
    #[error("missing 'elements' key")]
    MissingElements,
    /// `elements` exists but is not an array.
    #[error("'elements' is {0}, expected an array")]
    ElementsNotArray(&'static str),
    /// An entry is not an object.
    #[error("row {position} is {kind}, expected an object")]
    NonObjectRow { position: usize, kind: &'static str },
    /// The top level is neither an object nor an array of objects.
    #[error("top level is {0}, expected an object or an array of objects")]
    NotRecords(&'static str),
    /// An array was expected to hold exactly one object.
    #[error("array holds {0} records, expected exactly one")]
    NotSingleRecord(usize),
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn into_records(rows: Vec<Value>) -> Result<Vec<Record>, ShapeError> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| match row {
            Value::Object(map) => Ok(map),
            other => Err(ShapeError::NonObjectRow {
                position,
                kind: kind_of(&other),
            }),
        })
        .collect()
}

/// Extract the records under the top-level `elements` key.
///
/// # Errors
///
/// Returns the [`ShapeError`] describing the first problem found.
pub fn elements_records(body: &str) -> Result<Vec<Record>, ShapeError> {
    let mut top = match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => map,
        other => return Err(ShapeError::NotAnObject(kind_of(&other))),
    };
    match top.remove("elements") {
        None => Err(ShapeError::MissingElements),
        Some(Value::Array(rows)) => into_records(rows),
        Some(other) => Err(ShapeError::ElementsNotArray(kind_of(&other))),
    }
}

/// Extract records from a body that is either one object or an array of
/// objects.
///
/// # Errors
///
/// Returns the [`ShapeError`] describing the first problem found.
pub fn object_records(body: &str) -> Result<Vec<Record>, ShapeError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(vec![map]),
        Value::Array(rows) => into_records(rows),
        other => Err(ShapeError::NotRecords(kind_of(&other))),
    }
}

/// Extract the one record of a body that is either an object or an array
/// holding exactly one object.
///
/// # Errors
///
/// Returns the [`ShapeError`] describing the first problem found.
pub fn single_record(body: &str) -> Result<Record, ShapeError> {
    let mut records = object_records(body)?;
    match records.len() {
        1 => Ok(records.remove(0)),
        n => Err(ShapeError::NotSingleRecord(n)),
    }
}

/// Decode an `{"elements": [...]}` body into a positionally numbered table.
///
/// Any other shape yields an empty table and a warning naming `url`.
#[must_use]
pub fn decode_elements(url: &str, body: &str) -> Table {
    match elements_records(body) {
        Ok(records) => {
            tracing::debug!(%url, rows = records.len(), "decoded elements");
            Table::from_records(records)
        }
        Err(reason) => {
            tracing::warn!(%url, %reason, "response has no usable elements, returning empty table");
            Table::empty()
        }
    }
}

/// Decode an object (or array of objects) body, labelling every row with
/// `label`.
///
/// Any other shape yields an empty table and a warning naming `url`.
#[must_use]
pub fn decode_labeled(url: &str, body: &str, label: &str) -> Table {
    match object_records(body) {
        Ok(records) => Table::from_labeled_records(label, records),
        Err(reason) => {
            tracing::warn!(%url, %label, %reason, "response has no usable records, returning empty table");
            Table::empty()
        }
    }
}

/// Decode a body holding exactly one record into a one-row table labelled
/// `label`.
///
/// Any other shape, including an array of zero or several records, yields an
/// empty table and a warning naming `url`.
#[must_use]
pub fn decode_single_labeled(url: &str, body: &str, label: &str) -> Table {
    match single_record(body) {
        Ok(record) => Table::from_labeled_records(label, [record]),
        Err(reason) => {
            tracing::warn!(%url, %label, %reason, "response is not a single record, returning empty table");
            Table::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::RowIndex;
    use serde_json::json;
    use tracing_test::traced_test;

    const URL: &str = "https://api.example.test/field_header";

    #[test]
    fn elements_become_rows() {
        let body = json!({
            "elements": [
                {"fie_id": 1, "field_name": "Troll"},
                {"fie_id": 2, "basin_name": "North Sea"}
            ],
            "total": 2
        })
        .to_string();

        let table = decode_elements(URL, &body);
        assert_eq!(table.len(), 2);
        assert!(table.has_column("fie_id"));
        assert!(table.has_column("field_name"));
        assert!(table.has_column("basin_name"));
        assert!(!table.has_column("total"));
        assert_eq!(table.get(0, "field_name"), Some(&json!("Troll")));
    }

    #[test]
    fn empty_elements_is_empty_table() {
        let table = decode_elements(URL, r#"{"elements": []}"#);
        assert!(table.is_blank());
    }

    #[traced_test]
    #[test]
    fn missing_elements_is_logged_empty_table() {
        let table = decode_elements(URL, r#"{"items": [{"a": 1}]}"#);
        assert!(table.is_blank());
        assert!(logs_contain("missing 'elements' key"));
        assert!(logs_contain("returning empty table"));
    }

    #[traced_test]
    #[test]
    fn malformed_json_is_logged_empty_table() {
        let table = decode_elements(URL, "{not json");
        assert!(table.is_blank());
        assert!(logs_contain("malformed JSON"));
    }

    #[test]
    fn shape_errors_are_specific() {
        assert!(matches!(
            elements_records("[1]").unwrap_err(),
            ShapeError::NotAnObject("an array")
        ));
        assert!(matches!(
            elements_records(r#"{"elements": {"a": 1}}"#).unwrap_err(),
            ShapeError::ElementsNotArray("an object")
        ));
        assert!(matches!(
            elements_records(r#"{"elements": [{"a": 1}, 5]}"#).unwrap_err(),
            ShapeError::NonObjectRow { position: 1, kind: "a number" }
        ));
    }

    #[test]
    fn labeled_object_is_single_row() {
        let table = decode_labeled(URL, r#"{"name": "Acme"}"#, "C100");
        assert_eq!(table.len(), 1);
        let row = table.row_by_label("C100").unwrap();
        assert_eq!(row.get("name"), Some(&json!("Acme")));
    }

    #[test]
    fn labeled_array_labels_every_row() {
        let table = decode_labeled(URL, r#"[{"id": 1}, {"id": 2}]"#, "C100");
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| r.index().as_label() == Some("C100")));
    }

    #[test]
    fn single_record_accepts_object_or_one_element_array() {
        let table = decode_single_labeled(URL, r#"{"name": "Acme"}"#, "C100");
        assert_eq!(table.len(), 1);

        let table = decode_single_labeled(URL, r#"[{"name": "Acme"}]"#, "C100");
        assert_eq!(table.index(), vec![&RowIndex::Label("C100".to_string())]);
        assert_eq!(table.get(0, "name"), Some(&json!("Acme")));
    }

    #[traced_test]
    #[test]
    fn several_records_for_one_label_is_logged_empty_table() {
        let table = decode_single_labeled(URL, r#"[{"name": "Acme"}, {"name": "Beta"}]"#, "C100");
        assert!(table.is_blank());
        assert!(logs_contain("array holds 2 records, expected exactly one"));
        assert!(logs_contain("returning empty table"));
    }

    #[test]
    fn empty_array_is_not_a_single_record() {
        assert!(matches!(single_record("[]").unwrap_err(), ShapeError::NotSingleRecord(0)));
        assert!(matches!(
            single_record("[1]").unwrap_err(),
            ShapeError::NonObjectRow { position: 0, kind: "a number" }
        ));
    }

    #[traced_test]
    #[test]
    fn labeled_scalar_is_logged_empty_table() {
        let table = decode_labeled(URL, "42", "C100");
        assert!(table.is_blank());
        assert!(logs_contain("expected an object or an array of objects"));
    }
}
