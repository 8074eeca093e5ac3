//! End-to-end tests for the ICONA client against a mock server.

mod common;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use refdata::core::table::RowIndex;
use refdata::error::RefDataError;
use refdata::test_utils::{
    TEST_ICONA_KEY, make_test_company_json, make_test_icona_client,
    make_test_parent_child_tree_json,
};

use common::log_capture::TestLogCapture;
use common::mock::{mount_json, mount_raw};

#[tokio::test]
async fn company_basics_are_labelled_with_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company"))
        .and(query_param("SearchString", "C:C100"))
        .and(header("icona-auth-key", TEST_ICONA_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_test_company_json("Acme")))
        .expect(1)
        .mount(&server)
        .await;

    let table = make_test_icona_client(&server.uri())
        .get_basics_by_company_id("C100")
        .await
        .expect("company lookup succeeds");

    assert_eq!(table.len(), 1);
    assert_eq!(table.index(), vec![&RowIndex::Label("C100".to_string())]);
    let row = table.row_by_label("C100").unwrap();
    assert_eq!(row.get("name"), Some(&json!("Acme")));
}

#[tokio::test]
async fn numeric_company_id_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company"))
        .and(query_param("SearchString", "C:100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_test_company_json("Acme")))
        .mount(&server)
        .await;

    let table = make_test_icona_client(&server.uri())
        .get_basics_by_company_id(100)
        .await
        .unwrap();
    assert!(table.row_by_label("100").is_some());
}

#[tokio::test]
async fn parent_child_tree_labels_every_row() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/company/parentchildtree/C100",
        200,
        &make_test_parent_child_tree_json(),
    )
    .await;

    let table = make_test_icona_client(&server.uri())
        .get_parent_child_tree_by_id("C100")
        .await
        .expect("tree lookup succeeds");

    assert_eq!(table.len(), 2);
    assert!(table.rows().iter().all(|r| r.index().as_label() == Some("C100")));
    assert_eq!(table.get(1, "parent_id"), Some(&json!("C100")));
}

#[tokio::test]
async fn unauthorized_company_lookup_propagates() {
    let server = MockServer::start().await;
    mount_json(&server, "/company", 401, &json!({"message": "invalid key"})).await;

    let err = make_test_icona_client(&server.uri())
        .get_basics_by_company_id("C100")
        .await
        .unwrap_err();

    assert!(matches!(err, RefDataError::Unauthorized { .. }));
    assert!(err.fix_suggestions()[0].context.contains("Login failed"));
    assert_eq!(err.server_body(), Some("{\"message\":\"invalid key\"}"));
}

#[tokio::test]
async fn plain_text_success_is_wrong_content_type() {
    let server = MockServer::start().await;
    mount_raw(&server, "/company/parentchildtree/C100", 200, "text/plain", "maintenance").await;

    let err = make_test_icona_client(&server.uri())
        .get_parent_child_tree_by_id("C100")
        .await
        .unwrap_err();
    assert!(matches!(err, RefDataError::WrongContentType { .. }));
}

#[tokio::test]
async fn scalar_body_degrades_to_empty_table() {
    let capture = TestLogCapture::start();
    let server = MockServer::start().await;
    mount_json(&server, "/company/parentchildtree/C100", 200, &json!("none")).await;

    let table = make_test_icona_client(&server.uri())
        .get_parent_child_tree_by_id("C100")
        .await
        .unwrap();

    assert!(table.is_blank());
    capture.assert_logged_at_level(tracing::Level::WARN, "returning empty table");
}

#[tokio::test]
async fn several_company_records_degrade_to_empty_table() {
    let capture = TestLogCapture::start();
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/company",
        200,
        &json!([{"name": "Acme"}, {"name": "Beta"}]),
    )
    .await;

    let table = make_test_icona_client(&server.uri())
        .get_basics_by_company_id("C100")
        .await
        .expect("shape problems do not fail the call");

    assert!(table.is_blank());
    capture.assert_logged_at_level(tracing::Level::WARN, "not a single record");
    capture.assert_field_logged("reason", "array holds 2 records");
}

#[tokio::test]
async fn one_element_company_array_is_single_row() {
    let server = MockServer::start().await;
    mount_json(&server, "/company", 200, &json!([{"name": "Acme"}])).await;

    let table = make_test_icona_client(&server.uri())
        .get_basics_by_company_id("C100")
        .await
        .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.row_by_label("C100").unwrap().get("name"), Some(&json!("Acme")));
}
