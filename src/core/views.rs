//! Reservoir view flattening.
//!
//! The views listing returns `[{"name": ...}, ...]`. Each view's detail
//! endpoint returns `{"view_name": ..., "Elements": [[row, ...], ...]}`.
//! Every row of every element is labelled with the view name, rows are
//! deduplicated per view, the views are unioned in listing order and the
//! union is deduplicated once more.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::http::{RawResponse, Session};
use super::query::encode_id;
use super::table::{Record, Table};
use crate::error::Result;

/// One entry of the views listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewDescriptor {
    /// View name, used as the last path segment of the detail endpoint.
    pub name: String,
}

/// Body of a view detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewDetail {
    /// Name the rows are labelled with. Any JSON scalar is accepted; strings
    /// are kept verbatim and other scalars use their JSON text.
    #[serde(deserialize_with = "scalar_label")]
    pub view_name: String,
    /// Pages of row objects.
    #[serde(rename = "Elements")]
    pub elements: Vec<Vec<Record>>,
}

fn scalar_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(label) => Ok(label),
        scalar @ (Value::Number(_) | Value::Bool(_) | Value::Null) => Ok(scalar.to_string()),
        Value::Array(_) | Value::Object(_) => Err(de::Error::custom(
            "view_name must be a string, number, boolean or null",
        )),
    }
}

/// Decode the views listing.
///
/// # Errors
///
/// Returns [`RefDataError::ParseResponse`](crate::error::RefDataError::ParseResponse)
/// unless the body is an array of objects with a string `name`.
pub fn parse_listing(response: &RawResponse) -> Result<Vec<ViewDescriptor>> {
    response.json()
}

/// Decode one view detail.
///
/// # Errors
///
/// Returns [`RefDataError::ParseResponse`](crate::error::RefDataError::ParseResponse)
/// unless the body carries a scalar `view_name` and an `Elements` array of
/// arrays of objects.
pub fn parse_detail(response: &RawResponse) -> Result<ViewDetail> {
    response.json()
}

/// Detail endpoint for `name` under the listing endpoint `listing_url`.
#[must_use]
pub fn view_url(listing_url: &str, name: &str) -> String {
    format!("{}/{}", listing_url.trim_end_matches('/'), encode_id(name))
}

/// Flatten one view: label every row with `view_name` and drop duplicates
/// within the view.
#[must_use]
pub fn flatten_view(detail: &ViewDetail) -> Table {
    let mut builder = Table::builder();
    for element in &detail.elements {
        for row in element {
            builder.push_labeled(detail.view_name.as_str(), row.clone());
        }
    }
    let before = builder.len();
    builder.dedup();
    tracing::debug!(
        view = %detail.view_name,
        elements = detail.elements.len(),
        rows = builder.len(),
        dropped = before - builder.len(),
        "flattened view"
    );
    builder.build()
}

/// Union flattened views in order and deduplicate across views.
#[must_use]
pub fn flatten_views<I>(details: I) -> Table
where
    I: IntoIterator<Item = ViewDetail>,
{
    let mut builder = Table::builder();
    for detail in details {
        builder.append(flatten_view(&detail));
    }
    builder.dedup();
    builder.build()
}

/// Fetch every view under `listing_url` and flatten them into one table.
///
/// Views are requested in listing order with at most `concurrency` requests
/// in flight (1 means strictly sequential). Results are consumed in listing
/// order whatever order they arrive in. The first failure aborts the whole
/// run.
///
/// # Errors
///
/// Returns the classified error of the first failed request, or
/// [`RefDataError::ParseResponse`](crate::error::RefDataError::ParseResponse)
/// for a listing or detail of the wrong shape.
pub async fn fetch_views(session: &Session, listing_url: &str, concurrency: usize) -> Result<Table> {
    let listing = session.get_classified(listing_url, &[]).await?;
    let views = parse_listing(&listing)?;
    tracing::info!(url = %listing_url, views = views.len(), "fetching reservoir views");

    let details: Vec<ViewDetail> = stream::iter(views)
        .map(|view| {
            let url = view_url(listing_url, &view.name);
            async move {
                let response = session.get_classified(&url, &[]).await?;
                parse_detail(&response)
            }
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let table = flatten_views(details);
    tracing::info!(rows = table.len(), columns = table.columns().len(), "views flattened");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefDataError;
    use serde_json::json;

    fn detail(value: serde_json::Value) -> ViewDetail {
        serde_json::from_value(value).unwrap()
    }

    fn ok(body: serde_json::Value) -> RawResponse {
        RawResponse {
            url: "https://api.example.test/views".to_string(),
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn duplicate_rows_within_view_collapse() {
        let table = flatten_views([detail(json!({
            "view_name": "v1",
            "Elements": [[{"a": 1}], [{"a": 1}]]
        }))]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "a"), Some(&json!(1)));
        assert_eq!(table.rows()[0].index().as_label(), Some("v1"));
    }

    #[test]
    fn integer_and_float_spellings_collapse() {
        let table = flatten_views([detail(json!({
            "view_name": "v1",
            "Elements": [[{"a": 1}], [{"a": 1.0}]]
        }))]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "a"), Some(&json!(1)));
    }

    #[test]
    fn cross_view_duplicates_removed_at_union() {
        let table = flatten_views([
            detail(json!({"view_name": "v1", "Elements": [[{"a": 1}, {"a": 2}]]})),
            detail(json!({"view_name": "v2", "Elements": [[{"a": 2}, {"a": 3}]]})),
        ]);

        assert_eq!(table.len(), 3);
        let labels: Vec<_> = table.index().iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["v1", "v1", "v2"]);
    }

    #[test]
    fn view_without_elements_contributes_nothing() {
        let table = flatten_views([
            detail(json!({"view_name": "empty", "Elements": []})),
            detail(json!({"view_name": "v2", "Elements": [[{"a": 1}]]})),
        ]);
        assert_eq!(table.len(), 1);
        assert!(table.row_by_label("empty").is_none());
    }

    #[test]
    fn no_views_is_blank_table() {
        assert!(flatten_views(Vec::new()).is_blank());
    }

    #[test]
    fn flattening_is_idempotent_up_to_order() {
        let details = vec![
            detail(json!({"view_name": "v1", "Elements": [[{"a": 1, "b": "x"}], [{"a": 2}]]})),
            detail(json!({"view_name": "v2", "Elements": [[{"a": 2}, {"b": "y"}]]})),
        ];
        let first = flatten_views(details.clone());
        let second = flatten_views(details);
        assert!(first.same_rows_as(&second));

        let mut builder = Table::builder();
        builder.append(first.clone()).dedup();
        assert_eq!(builder.len(), first.len(), "flattened output has duplicate rows");
    }

    #[test]
    fn listing_and_detail_parse() {
        let views = parse_listing(&ok(json!([{"name": "v1", "description": "x"}, {"name": "v2"}])))
            .unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].name, "v2");

        let detail = parse_detail(&ok(json!({"view_name": "v1", "Elements": [[{"a": 1}]]}))).unwrap();
        assert_eq!(detail.elements.len(), 1);
    }

    #[test]
    fn listing_of_wrong_shape_is_parse_error() {
        let err = parse_listing(&ok(json!({"views": []}))).unwrap_err();
        assert!(matches!(err, RefDataError::ParseResponse { .. }));

        let err = parse_detail(&ok(json!({"view_name": "v1"}))).unwrap_err();
        assert!(matches!(err, RefDataError::ParseResponse { .. }));
    }

    #[test]
    fn scalar_view_names_become_labels() {
        let numeric = parse_detail(&ok(json!({"view_name": 7, "Elements": [[{"a": 1}]]}))).unwrap();
        assert_eq!(numeric.view_name, "7");

        let null = parse_detail(&ok(json!({"view_name": null, "Elements": []}))).unwrap();
        assert_eq!(null.view_name, "null");

        let table = flatten_views([
            numeric,
            detail(json!({"view_name": "v2", "Elements": [[{"a": 2}]]})),
        ]);
        let labels: Vec<_> = table.index().iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["7", "v2"]);
    }

    #[test]
    fn structured_view_name_is_parse_error() {
        let err = parse_detail(&ok(json!({"view_name": ["v1"], "Elements": []}))).unwrap_err();
        match err {
            RefDataError::ParseResponse { message, .. } => {
                assert!(message.contains("view_name must be"));
            }
            other => panic!("Expected ParseResponse, got: {other:?}"),
        }
    }

    #[test]
    fn view_url_joins_and_encodes() {
        assert_eq!(view_url("https://h/views", "v1"), "https://h/views/v1");
        assert_eq!(view_url("https://h/views/", "my view"), "https://h/views/my%20view");
    }
}
