//! Tests for the log capture helper and the events refdata emits.

mod common;

use serde_json::json;
use wiremock::MockServer;

use refdata::test_utils::make_test_eandp_client;

use common::log_capture::TestLogCapture;
use common::mock::mount_json;

#[test]
fn capture_records_message_and_fields() {
    let capture = TestLogCapture::start();

    tracing::info!(view = "v1", rows = 3, "flattened view");

    capture.assert_logged_at_level(tracing::Level::INFO, "flattened view");
    capture.assert_field_logged("view", "v1");
    capture.assert_field_logged("rows", "3");
    assert_eq!(capture.count_at_level(tracing::Level::WARN), 0);
}

#[tokio::test]
async fn classified_failure_is_logged_with_code() {
    let capture = TestLogCapture::start();
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/adm/eandp/retrieve/field_header",
        500,
        &json!({"error": "upstream"}),
    )
    .await;

    let _ = make_test_eandp_client(&server.uri())
        .field_data_by_id(1)
        .await
        .unwrap_err();

    capture.assert_logged_at_level(tracing::Level::WARN, "classified failure");
    capture.assert_field_logged("code", "REFDATA-H500");
    capture.assert_field_logged("vendor", "eandp");
}
