//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use roster_client::ItemsClient;
use roster_engine::App;
use roster_types::{ApiToken, UiOptions};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Start a mock server that simulates the items backend.
pub async fn start_items_mock() -> MockServer {
    MockServer::start().await
}

/// The canonical three-item fixture used across the suite.
pub fn sample_items() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "type": "note", "title": "Hello", "created_at": "2024-01-01T00:00:00Z"},
        {"id": 2, "type": "task", "title": "Write tests", "created_at": "2024-01-02T09:30:00Z"},
        {"id": 3, "type": "note", "title": "Ship it", "created_at": "2024-01-03T18:45:00Z"},
    ])
}

/// Mount a 200 response with the given JSON body on `GET /items`.
pub async fn mount_items(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Same as [`mount_items`] but the response is held back for `delay`,
/// keeping the view in the loading phase.
pub async fn mount_delayed_items(server: &MockServer, items: serde_json::Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Mount a bare status-code response on `GET /items`.
pub async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount a 200 response whose body is not valid JSON.
pub async fn mount_malformed_body(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(server)
        .await;
}

/// Client pointed at the mock server with the shared test token.
pub fn client_for(server: &MockServer) -> ItemsClient {
    let base = Url::parse(&server.uri()).expect("mock server URI is a valid URL");
    ItemsClient::new(&base, ApiToken::new(TEST_TOKEN).unwrap()).unwrap()
}

/// Client pointed at an address nothing listens on (connection refused).
pub fn offline_client() -> ItemsClient {
    let base = Url::parse("http://127.0.0.1:9").unwrap();
    ItemsClient::new(&base, ApiToken::new(TEST_TOKEN).unwrap()).unwrap()
}

/// App mounted against the mock server, default UI options.
pub fn app_for(server: &MockServer) -> App {
    App::new(client_for(server), UiOptions::default())
}

/// Poll the outcome channel until the fetch resolves.
///
/// Panics if the mount does not reach a terminal phase within a generous
/// timeout; tests must never hang on a lost outcome.
pub async fn settle(app: &mut App) {
    for _ in 0..200 {
        app.process_fetch_outcomes();
        if app.phase().is_terminal() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("fetch did not settle within timeout");
}
