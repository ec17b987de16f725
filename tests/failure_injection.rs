//! Failure injection tests for the retrying transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eureka_client::config::RetryConfig;
use eureka_client::transport::{HttpRequest, RetryingTransport, Transport, TransportConfig};
use eureka_client::ClientError;

mod common;

use common::MockResponse;

fn transport(timeout: Duration, max_retries: u32) -> RetryingTransport {
    RetryingTransport::new(TransportConfig {
        endpoint: "test",
        timeout,
        connect_timeout: timeout.min(Duration::from_millis(200)),
        verify_cert: true,
        retry: RetryConfig {
            max_retries,
            base_delay_ms: 100,
            max_delay_ms: 400,
        },
    })
    .unwrap()
}

#[tokio::test]
async fn test_connection_refused_exhausts_retries() {
    let addr = common::unused_addr().await;
    let transport = transport(Duration::from_secs(2), 2);

    let start = Instant::now();
    let err = transport
        .send(HttpRequest::get(format!("http://{}/", addr)))
        .await
        .unwrap_err();

    match err {
        ClientError::Transport { url, .. } => assert_eq!(url, format!("http://{}/", addr)),
        other => panic!("unexpected error: {other}"),
    }
    // Two backoffs (100ms + 200ms) before giving up.
    assert!(
        start.elapsed() >= Duration::from_millis(300),
        "gave up after {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_stalled_connect_is_retried() {
    // Nothing answers on this address; each attempt ends at the connect timeout.
    let url = "http://10.255.255.1:81/";
    let transport = transport(Duration::from_secs(5), 2);

    let start = Instant::now();
    let err = transport.send(HttpRequest::get(url)).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    // Two backoffs (100ms + 200ms) prove the failure was retried.
    assert!(
        start.elapsed() >= Duration::from_millis(300),
        "gave up after {:?}",
        start.elapsed()
    );
    // Well short of the 5s request timeout per attempt.
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_retry_until_server_comes_up() {
    let addr = common::unused_addr().await;
    let transport = transport(Duration::from_secs(2), 5);

    let server = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        common::start_programmable_server_at(addr, |_| MockResponse::new(200, "up")).await
    });

    let response = transport
        .send(HttpRequest::get(format!("http://{}/health", addr)))
        .await
        .expect("transport should retry until the server is listening");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "up");

    let server = server.await.unwrap();
    assert_eq!(server.lines(), vec!["GET /health"]);
}

#[tokio::test]
async fn test_http_errors_are_not_retried() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let server = common::start_programmable_server(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        MockResponse::new(503, "Service Unavailable")
    })
    .await;
    let transport = transport(Duration::from_secs(2), 3);

    let response = transport
        .send(HttpRequest::get(server.url("/busy")))
        .await
        .unwrap();

    assert_eq!(response.status, 503);
    assert!(!response.is_success());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_timeout_is_not_retried() {
    let server = common::start_programmable_server(|_| {
        MockResponse::new(200, "late").delayed(Duration::from_secs(3))
    })
    .await;
    let transport = transport(Duration::from_millis(500), 3);

    let start = Instant::now();
    let err = transport
        .send(HttpRequest::get(server.url("/slow")))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_form_and_headers_reach_server() {
    let server = common::start_programmable_server(|_| {
        MockResponse::new(201, "").header("Location", "http://cas.example/v1/tickets/TGT-1")
    })
    .await;
    let transport = transport(Duration::from_secs(2), 0);

    let response = transport
        .send(HttpRequest::post_form(
            server.url("/v1/tickets/"),
            [("username", "alice"), ("password", "p&ss=word")],
        ))
        .await
        .unwrap();
    assert_eq!(response.location(), Some("http://cas.example/v1/tickets/TGT-1"));

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.form_value("password").as_deref(), Some("p&ss=word"));
    let request_id = request.header("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}
