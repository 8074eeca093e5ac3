//! Result tables.
//!
//! A [`Table`] is an ordered list of rows. Each row carries an index label
//! and a map from column name to JSON value; the table's columns are the
//! union of all row keys in first-seen order. Tables are assembled through a
//! [`TableBuilder`] (concatenation and deduplication happen there) and are
//! read-only once built.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// One decoded record: field name to value.
pub type Record = Map<String, Value>;

/// Row index label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RowIndex {
    /// Default positional numbering, starting at 0 per decoded response.
    Position(usize),
    /// Caller-supplied label (company id, view name).
    Label(String),
}

impl RowIndex {
    /// The label, if this is a labelled index.
    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Position(_) => None,
        }
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(pos) => write!(f, "{pos}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// A single table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    index: RowIndex,
    values: Record,
}

impl Row {
    /// Index label of this row.
    #[must_use]
    pub const fn index(&self) -> &RowIndex {
        &self.index
    }

    /// Value of `column`, if the row has it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// All values of the row.
    #[must_use]
    pub const fn values(&self) -> &Record {
        &self.values
    }
}

/// Tabular result returned by every public operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Zero rows, zero columns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Start building a table.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// One row per record, numbered from 0.
    #[must_use]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut builder = Self::builder();
        for record in records {
            builder.push_record(record);
        }
        builder.build()
    }

    /// One row per record, every row labelled `label`.
    #[must_use]
    pub fn from_labeled_records<I>(label: &str, records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut builder = Self::builder();
        for record in records {
            builder.push_labeled(label, record);
        }
        builder.build()
    }

    /// Column names in first-seen order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table has neither rows nor columns.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Whether `column` is present.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Value at (`row`, `column`).
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Row index labels in order.
    #[must_use]
    pub fn index(&self) -> Vec<&RowIndex> {
        self.rows.iter().map(Row::index).collect()
    }

    /// Values of one column, `None` where a row lacks it.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |r| r.get(column))
    }

    /// First row carrying `label`.
    #[must_use]
    pub fn row_by_label(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.index.as_label() == Some(label))
    }

    /// Rows as a JSON array of objects, for handing to other tooling.
    #[must_use]
    pub fn to_records(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|r| Value::Object(r.values.clone()))
                .collect(),
        )
    }

    /// Whether two tables hold the same rows regardless of order.
    #[must_use]
    pub fn same_rows_as(&self, other: &Self) -> bool {
        let mut columns: Vec<&String> = self.columns.iter().collect();
        columns.sort();
        let mut other_columns: Vec<&String> = other.columns.iter().collect();
        other_columns.sort();
        if columns != other_columns {
            return false;
        }

        let keyed = |table: &Self| {
            let mut keys: Vec<(String, String)> = table
                .rows
                .iter()
                .map(|r| (r.index.to_string(), content_key(&columns, r)))
                .collect();
            keys.sort();
            keys
        };
        keyed(self) == keyed(other)
    }
}

/// Content identity of a row over `columns`; missing cells count as null.
fn content_key<S: AsRef<str>>(columns: &[S], row: &Row) -> String {
    const SEP: char = '\u{1f}';
    let mut key = String::new();
    for column in columns {
        let cell = row.values.get(column.as_ref()).unwrap_or(&Value::Null);
        push_canonical(&mut key, cell);
        key.push(SEP);
    }
    key
}

/// JSON text of `value` with every number written by its numeric value, so
/// `1`, `1.0` and `-0.0`/`0` compare equal.
fn push_canonical(key: &mut String, value: &Value) {
    match value {
        Value::Number(number) => match number.as_f64() {
            // Adding zero folds -0.0 into 0.0.
            Some(float) => key.push_str(&(float + 0.0).to_string()),
            None => key.push_str(&number.to_string()),
        },
        Value::Array(items) => {
            key.push('[');
            for item in items {
                push_canonical(key, item);
                key.push(',');
            }
            key.push(']');
        }
        Value::Object(map) => {
            key.push('{');
            for (name, item) in map {
                key.push_str(&Value::String(name.clone()).to_string());
                key.push(':');
                push_canonical(key, item);
                key.push(',');
            }
            key.push('}');
        }
        scalar => key.push_str(&scalar.to_string()),
    }
}

/// Incremental constructor for [`Table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<String>,
    known: HashSet<String>,
    rows: Vec<Row>,
    next_position: usize,
}

impl TableBuilder {
    fn note_columns(&mut self, record: &Record) {
        for key in record.keys() {
            if self.known.insert(key.clone()) {
                self.columns.push(key.clone());
            }
        }
    }

    /// Append a record with the next positional index.
    pub fn push_record(&mut self, record: Record) -> &mut Self {
        let index = RowIndex::Position(self.next_position);
        self.next_position += 1;
        self.push_row(index, record)
    }

    /// Append a record labelled `label`.
    pub fn push_labeled(&mut self, label: impl Into<String>, record: Record) -> &mut Self {
        self.push_row(RowIndex::Label(label.into()), record)
    }

    fn push_row(&mut self, index: RowIndex, values: Record) -> &mut Self {
        self.note_columns(&values);
        self.rows.push(Row { index, values });
        self
    }

    /// Concatenate `table` below the rows collected so far, keeping its
    /// index labels.
    pub fn append(&mut self, table: Table) -> &mut Self {
        for column in table.columns {
            if self.known.insert(column.clone()) {
                self.columns.push(column);
            }
        }
        self.rows.extend(table.rows);
        self
    }

    /// Drop rows equal to an earlier row across every column.
    ///
    /// The index label takes no part in the comparison; the first occurrence
    /// is kept. A missing cell equals an explicit `null`.
    pub fn dedup(&mut self) -> &mut Self {
        let columns = &self.columns;
        let mut seen = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(content_key(columns, row)));
        self
    }

    /// Number of rows collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finish the table.
    #[must_use]
    pub fn build(self) -> Table {
        Table {
            columns: self.columns,
            rows: self.rows,
        }
    }
}
