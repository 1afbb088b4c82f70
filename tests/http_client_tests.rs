//! Integration tests for the HTTP transport.
//!
//! These tests run requests against a local mock server and verify the
//! headers that are sent, retry behavior, proxy usage and how responses are
//! buffered.

use std::time::Duration;

use seamlesspay_api::clients::{ApiRequest, HttpClient, HttpError, HttpMethod, StreamError};
use seamlesspay_api::{
    AccountId, ApiKey, ApiVersion, ClientDefaults, EndpointUrl, IdempotencyKey, ProxyCredential,
    RequestOptions,
};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates defaults pointing at the given mock server.
fn defaults_for(server: &MockServer) -> ClientDefaults {
    ClientDefaults::builder()
        .api_key(ApiKey::new("sk_test").unwrap())
        .api_base(EndpointUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

fn get(url: String, options: &RequestOptions) -> ApiRequest {
    ApiRequest::builder(HttpMethod::Get, url).build(options).unwrap()
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn test_request_sends_identification_and_option_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/charges"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer c2tfdGVzdA=="))
        .and(header("accept", "application/json"))
        .and(header("api-version", "v1"))
        .and(header("idempotency-key", "order-42"))
        .and(header("seamlesspay-account", "acct_1"))
        .and(header_exists("x-seamlesspay-client-user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::builder(&defaults)
        .idempotency_key(IdempotencyKey::new("order-42").unwrap())
        .seamlesspay_account(AccountId::new("acct_1").unwrap())
        .version_override(ApiVersion::V1)
        .build()
        .unwrap();
    let request = ApiRequest::builder(HttpMethod::Get, format!("{}/charges", server.uri()))
        .query_param("page", "2")
        .build(&options)
        .unwrap();

    let response = HttpClient::new(defaults).request(&request).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.num_retries, 0);
}

#[tokio::test]
async fn test_user_agent_prefix_is_prepended_once() {
    let server = MockServer::start().await;
    let expected = format!(
        "MyApp/1.0 SeamlessPay/v2 RustBindings/{}",
        seamlesspay_api::clients::SDK_VERSION
    );
    Mock::given(method("GET"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let defaults = ClientDefaults::builder()
        .api_key(ApiKey::new("sk_test").unwrap())
        .api_base(EndpointUrl::new(server.uri()).unwrap())
        .user_agent_prefix("MyApp/1.0")
        .build()
        .unwrap();
    let options = RequestOptions::from_defaults(&defaults);

    let response = HttpClient::new(defaults)
        .request(&get(format!("{}/ping", server.uri()), &options))
        .await
        .unwrap();
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .and(header("content-type", "application/json"))
        .and(wiremock::matchers::body_json(serde_json::json!({"customer": "cus_123"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "in_1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::from_defaults(&defaults);
    let request = ApiRequest::builder(HttpMethod::Post, format!("{}/v1/invoices", server.uri()))
        .content(
            seamlesspay_api::clients::HttpContent::json(&serde_json::json!({"customer": "cus_123"}))
                .unwrap(),
        )
        .build(&options)
        .unwrap();

    let response = HttpClient::new(defaults).request(&request).await.unwrap();
    assert_eq!(response.body, r#"{"id": "in_1"}"#);
}

// ============================================================================
// Non-2xx responses and streams
// ============================================================================

#[tokio::test]
async fn test_not_found_stream_unstreams_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("request-id", "req_404")
                .set_body_string(r#"{"message": "Not found"}"#),
        )
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::from_defaults(&defaults);
    let mut stream = HttpClient::new(defaults)
        .request_stream(&get(format!("{}/v1/quotes/qt_1/pdf", server.uri()), &options))
        .await
        .unwrap();

    assert_eq!(stream.code, 404);
    assert!(!stream.is_ok());

    let response = stream.unstream().await.unwrap();
    assert_eq!(response.code, 404);
    assert_eq!(response.body, r#"{"message": "Not found"}"#);
    assert_eq!(response.request_id(), Some("req_404"));

    assert!(stream.is_closed());
    assert!(matches!(stream.unstream().await, Err(StreamError::Closed)));
    assert!(matches!(stream.next_chunk().await, Err(StreamError::Closed)));
}

#[tokio::test]
async fn test_stream_reads_body_in_chunks() {
    let server = MockServer::start().await;
    let pdf = vec![0x25_u8; 64 * 1024];
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(pdf.clone()),
        )
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::from_defaults(&defaults);
    let mut stream = HttpClient::new(defaults)
        .request_stream(&get(format!("{}/pdf", server.uri()), &options))
        .await
        .unwrap();

    let mut received = Vec::new();
    while let Some(chunk) = stream.next_chunk().await.unwrap() {
        received.extend_from_slice(&chunk);
    }
    assert_eq!(received, pdf);
    assert_eq!(
        stream.headers.first_value("Content-Type"),
        Some("application/pdf")
    );
}

// ============================================================================
// Connectivity, timeouts and proxies
// ============================================================================

#[tokio::test]
async fn test_connection_failure_names_api_base() {
    let defaults = ClientDefaults::builder()
        .api_key(ApiKey::new("sk_test").unwrap())
        .build()
        .unwrap();
    let options = RequestOptions::from_defaults(&defaults);
    // Nothing listens on port 1
    let request = get("http://127.0.0.1:1/charges".to_string(), &options);

    let error = HttpClient::new(defaults).request(&request).await.unwrap_err();

    let HttpError::Connection(connection) = &error else {
        panic!("expected connection error, got {error:?}");
    };
    assert_eq!(connection.api_base, "https://api.seamlesspay.com");
    assert!(error
        .to_string()
        .starts_with("IOException during API request to SeamlessPay (https://api.seamlesspay.com)"));
}

#[tokio::test]
async fn test_read_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::builder(&defaults)
        .read_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    let result = HttpClient::new(defaults)
        .request(&get(format!("{}/slow", server.uri()), &options))
        .await;

    assert!(matches!(result, Err(HttpError::Connection(_))));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_proxy_receives_request_with_credentials() {
    let proxy = MockServer::start().await;
    // "user:pass" in base64
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .and(header("proxy-authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("via proxy"))
        .expect(1)
        .mount(&proxy)
        .await;

    let defaults = ClientDefaults::builder()
        .api_key(ApiKey::new("sk_test").unwrap())
        .build()
        .unwrap();
    let options = RequestOptions::builder(&defaults)
        .connection_proxy(EndpointUrl::new(proxy.uri()).unwrap())
        .proxy_credential(ProxyCredential::new("user", "pass").unwrap())
        .build()
        .unwrap();

    let response = HttpClient::new(defaults)
        .request(&get(
            "http://api.seamlesspay.invalid/v1/ping".to_string(),
            &options,
        ))
        .await
        .unwrap();

    assert_eq!(response.body, "via proxy");
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_rate_limited_request_is_retried_after_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("idempotency-key", "retry-me"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("idempotency-key", "retry-me"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok": true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::builder(&defaults)
        .max_network_retries(3)
        .idempotency_key(IdempotencyKey::new("retry-me").unwrap())
        .build()
        .unwrap();
    let request = ApiRequest::builder(HttpMethod::Post, format!("{}/charges", server.uri()))
        .build(&options)
        .unwrap();

    let response = HttpClient::new(defaults)
        .request_with_retries(&request)
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.num_retries, 2);
}

#[tokio::test]
async fn test_retries_stop_at_configured_maximum() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::builder(&defaults)
        .max_network_retries(1)
        .build()
        .unwrap();

    let response = HttpClient::new(defaults)
        .request_with_retries(&get(format!("{}/charges", server.uri()), &options))
        .await
        .unwrap();

    assert_eq!(response.code, 503);
    assert_eq!(response.body, "unavailable");
    assert_eq!(response.num_retries, 1);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let defaults = defaults_for(&server);
    let options = RequestOptions::builder(&defaults)
        .max_network_retries(3)
        .build()
        .unwrap();

    let response = HttpClient::new(defaults)
        .request_with_retries(&get(format!("{}/charges", server.uri()), &options))
        .await
        .unwrap();

    assert_eq!(response.code, 400);
    assert_eq!(response.num_retries, 0);
}
