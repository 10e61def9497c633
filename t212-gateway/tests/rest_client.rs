//! Executor behaviour against a mock brokerage.

use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use t212_core::error::{DataError, ErrorBody, T212Error};
use t212_gateway::rest::{RateLimitState, RestClient, RestConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHORIZATION: &str = "Basic aWQ6c2VjcmV0";

fn client_for(server: &MockServer) -> RestClient {
    client_with(server, RestConfig::builder())
}

fn client_with(server: &MockServer, builder: t212_gateway::rest::RestConfigBuilder) -> RestClient {
    let config = builder
        .base_url(format!("{}/api/v0", server.uri()))
        .credentials("id", "secret")
        .build();
    RestClient::new(config).unwrap()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn exhausted_until(reset: u64) -> ResponseTemplate {
    with_exhausted_window(ResponseTemplate::new(200).set_body_json(json!({"free": 1})), reset)
}

fn with_exhausted_window(template: ResponseTemplate, reset: u64) -> ResponseTemplate {
    template
        .insert_header("x-ratelimit-limit", "1")
        .insert_header("x-ratelimit-period", "5")
        .insert_header("x-ratelimit-remaining", "0")
        .insert_header("x-ratelimit-reset", reset.to_string().as_str())
        .insert_header("x-ratelimit-used", "1")
}

#[tokio::test]
async fn test_fetch_sends_credentials_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/account/cash"))
        .and(header("authorization", AUTHORIZATION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"free": 100.5, "total": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cash = client.fetch("equity/account/cash").await.unwrap();

    assert_eq!(cash, json!({"free": 100.5, "total": 200}));
}

#[tokio::test]
async fn test_rate_limit_headers_replace_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/portfolio"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-period", "60")
                .insert_header("x-ratelimit-remaining", "59")
                .insert_header("x-ratelimit-reset", "1700000000")
                .insert_header("x-ratelimit-used", "1"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.fetch("equity/portfolio").await.unwrap();

    assert_eq!(
        client.rate_limit_state().await,
        RateLimitState {
            limit: 60,
            period: 60,
            remaining: 59,
            reset: 1_700_000_000,
            used: 1,
        }
    );
}

#[tokio::test]
async fn test_missing_headers_reset_state_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .rate_limit_gate()
        .observe(RateLimitState {
            limit: 10,
            remaining: 5,
            ..RateLimitState::default()
        })
        .await;
    client.fetch("equity/account/info").await.unwrap();

    assert!(client.rate_limit_state().await.is_unknown());
}

#[tokio::test]
async fn test_persistent_429_is_retried_three_times() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch("equity/orders").await.unwrap_err();

    match err {
        T212Error::Api(api) => {
            assert_eq!(api.status, 429);
            assert!(api.is_rate_limited());
            assert_eq!(api.body, ErrorBody::Text("Too Many Requests".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_bound_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, RestConfig::builder().max_rate_limit_retries(0));
    let err = client.fetch("equity/orders").await.unwrap_err();
    assert!(matches!(err, T212Error::Api(ref api) if api.status == 429));
}

#[tokio::test]
async fn test_429_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/pies"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/pies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pies = client.fetch("equity/pies").await.unwrap();
    assert_eq!(pies, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_json_error_keeps_request_body() {
    let server = MockServer::start().await;
    let payload = json!({"quantity": 1.0, "ticker": "NOPE_EQ", "extendedHours": false});
    Mock::given(method("POST"))
        .and(path("/api/v0/equity/orders/market"))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": "InvalidTicker", "message": "Unknown ticker"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .submit("equity/orders/market", payload.clone())
        .await
        .unwrap_err();

    let T212Error::Api(api) = err else {
        panic!("expected an API error");
    };
    assert_eq!(api.method, "POST");
    assert_eq!(api.path, "equity/orders/market");
    assert_eq!(api.status, 400);
    assert_eq!(
        api.body,
        ErrorBody::Json(json!({"code": "InvalidTicker", "message": "Unknown ticker"}))
    );
    assert_eq!(api.request, Some(payload));
    assert_eq!(api.error_code().as_deref(), Some("InvalidTicker"));

    let rendered = api.to_string();
    assert!(rendered.contains("POST equity/orders/market"));
    assert!(rendered.contains("Request data"));
}

#[tokio::test]
async fn test_text_error_body_is_kept_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch("equity/account/cash").await.unwrap_err();

    let T212Error::Api(api) = err else {
        panic!("expected an API error");
    };
    assert_eq!(api.status, 502);
    assert_eq!(api.body, ErrorBody::Text("<html>Bad Gateway</html>".to_string()));
    assert_eq!(api.request, None);
}

#[tokio::test]
async fn test_remove_treats_empty_success_as_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v0/equity/orders/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.remove("equity/orders/42").await.unwrap());
}

#[tokio::test]
async fn test_remove_not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.remove("equity/pies/7").await.unwrap_err();

    let T212Error::Api(api) = err else {
        panic!("expected an API error");
    };
    assert!(api.is_not_found());
    assert_eq!(api.method, "DELETE");
}

#[tokio::test]
async fn test_success_with_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch("equity/account/info").await.unwrap_err();

    match err {
        T212Error::Data(DataError::Decode { status, raw, .. }) => {
            assert_eq!(status, 200);
            assert_eq!(raw, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    // Nothing listens on the discard port
    let config = RestConfig::builder()
        .base_url("http://127.0.0.1:9/api/v0")
        .credentials("id", "secret")
        .timeout(Duration::from_secs(5))
        .build();
    let client = RestClient::new(config).unwrap();

    let err = client.fetch("equity/account/cash").await.unwrap_err();
    assert!(err.is_network_error(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_exhausted_window_delays_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(exhausted_until(now_secs() + 2))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.fetch("equity/account/cash").await.unwrap();

    let start = Instant::now();
    client.fetch("equity/account/cash").await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_wait_beyond_ceiling_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(exhausted_until(now_secs() + 3600))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        &server,
        RestConfig::builder().max_rate_limit_wait(Duration::from_secs(1)),
    );
    client.fetch("equity/account/cash").await.unwrap();

    let start = Instant::now();
    let err = client.fetch("equity/account/cash").await.unwrap_err();
    assert!(matches!(err, T212Error::RateLimit(_)));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_concurrent_callers_share_one_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(8)
        .mount(&server)
        .await;

    let client = std::sync::Arc::new(client_for(&server));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = std::sync::Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.fetch("equity/portfolio").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_error_response_still_refreshes_window() {
    let server = MockServer::start().await;
    let reset = now_secs() + 2;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/pies/404"))
        .respond_with(with_exhausted_window(
            ResponseTemplate::new(404).set_body_string("Not Found"),
            reset,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/pies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch("equity/pies/404").await.unwrap_err();
    assert!(matches!(err, T212Error::Api(ref api) if api.is_not_found()));

    let window = client.rate_limit_state().await;
    assert_eq!(window.remaining, 0);
    assert_eq!(window.reset, reset);

    let start = Instant::now();
    client.fetch("equity/pies").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test]
async fn test_429_retry_waits_for_reported_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders"))
        .respond_with(with_exhausted_window(ResponseTemplate::new(429), now_secs() + 2))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let start = Instant::now();
    let orders = client.fetch("equity/orders").await.unwrap();

    assert_eq!(orders, json!([]));
    assert!(start.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test]
async fn test_slow_response_is_not_held_behind_a_throttled_caller() {
    let server = MockServer::start().await;
    let reset = now_secs() + 4;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/account/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .insert_header("x-ratelimit-limit", "2")
                .insert_header("x-ratelimit-remaining", "1")
                .insert_header("x-ratelimit-reset", reset.to_string().as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v0/equity/orders/market"))
        .respond_with(
            with_exhausted_window(ResponseTemplate::new(200), reset)
                .set_body_json(json!({"id": 1}))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server));
    client.fetch("equity/account/info").await.unwrap();

    let start = Instant::now();
    let order = {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            let placed = client
                .submit("equity/orders/market", json!({"quantity": 1.0, "ticker": "X"}))
                .await;
            (placed, start.elapsed())
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let throttled = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.fetch("equity/account/info").await })
    };

    let (placed, elapsed) = order.await.unwrap();
    assert_eq!(placed.unwrap(), json!({"id": 1}));
    assert!(elapsed < Duration::from_secs(2), "order returned after {elapsed:?}");
    assert!(!throttled.is_finished());
    throttled.abort();
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_retry_log_reports_observed_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-remaining", "7")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = client_for(&server);
    client.fetch("equity/portfolio").await.unwrap();

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Rate limited, retrying"), "{output}");
    assert!(output.contains("status=429"), "{output}");
    assert!(output.contains("remaining=7"), "{output}");
    assert!(output.contains("reset=1700000000"), "{output}");
}
