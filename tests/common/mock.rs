//! Wiremock shortcuts for vendor endpoints.
#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve `body` as `application/json` with `status` on GET `route`.
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: &Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Like [`mount_json`], answering after `delay`.
pub async fn mount_json_delayed(server: &MockServer, route: &str, body: &Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

/// Serve `body` with an explicit content type.
pub async fn mount_raw(server: &MockServer, route: &str, status: u16, content_type: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), content_type))
        .mount(server)
        .await;
}
