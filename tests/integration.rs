use std::sync::Once;

use serde::Deserialize;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gateway_client::{Config, Error, GatewayClient, RequestDescriptor};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn config(server: &MockServer) -> Config {
    Config::from_values(&server.uri(), None, Some(5_000), Some(5_000))
}

#[derive(Deserialize)]
struct Item {
    id: u64,
    name: String,
}

#[tokio::test]
async fn authenticated_fetch_and_json_decoding() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "1")
                .set_body_string(r#"[{"id":1,"name":"widget"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("T1");

    let response = client.get("/api/inventory").await.expect("fetch succeeds");
    let items: Vec<Item> = response.json().expect("body decodes");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].name, "widget");
    assert_eq!(
        response
            .headers
            .get("x-total-count")
            .and_then(|v| v.to_str().ok()),
        Some("1")
    );
}

#[tokio::test]
async fn post_sends_json_body_and_content_type() {
    init_logging();
    let server = MockServer::start().await;

    let entry = serde_json::json!({"title": "day one", "text": "wrote some rust"});
    Mock::given(method("POST"))
        .and(path("/api/diary"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&entry))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":7}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("T1");

    let response = client
        .post_json("/api/diary", &entry)
        .await
        .expect("post succeeds");
    assert_eq!(response.status.as_u16(), 201);
}

#[tokio::test]
async fn custom_headers_and_raw_bodies_pass_through() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat/messages"))
        .and(header("X-Request-Id", "req-42"))
        .and(body_string(r#"{"text":"hello"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("T1");

    let request = RequestDescriptor::post("/api/chat/messages")
        .with_header("X-Request-Id", "req-42")
        .with_raw_body(r#"{"text":"hello"}"#);
    client.execute(request).await.expect("request succeeds");
}

#[tokio::test]
async fn expired_token_recovers_transparently() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":"fresh"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("stale");

    // The caller sees a plain success; the refresh happened underneath.
    let response = client.get("/api/inventory").await.expect("recovers");
    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    init_logging();
    let server = MockServer::start().await;

    let update = serde_json::json!({"name": "widget", "quantity": 5});
    Mock::given(method("PUT"))
        .and(path("/api/inventory/1"))
        .and(body_json(&update))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/inventory/1"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("T1");

    client
        .put_json("/api/inventory/1", &update)
        .await
        .expect("update succeeds");
    let response = client
        .delete("/api/inventory/1")
        .await
        .expect("delete succeeds");
    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn logout_blocks_further_requests() {
    init_logging();
    let server = MockServer::start().await;

    let client = GatewayClient::new(config(&server)).expect("client builds");
    client.begin_session("T1");
    assert!(client.is_authenticated());

    client.logout();
    assert!(client.is_logged_out());

    let err = client
        .get("/api/inventory")
        .await
        .expect_err("no traffic after logout");
    assert!(matches!(err, Error::SessionExpired), "got {err}");
}

#[tokio::test]
async fn custom_refresh_path_is_respected() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(header("Authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(header("Authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/oauth/reissue"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":"new"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::from_values(
        &server.uri(),
        Some("/api/oauth/reissue".to_string()),
        Some(5_000),
        Some(5_000),
    );
    let client = GatewayClient::new(config).expect("client builds");
    client.begin_session("old");

    client.get("/api/items").await.expect("recovers via custom path");
}
