use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use doh_relay_api::{create_routes, AppState};
use doh_relay_infrastructure::dns::wire;
use doh_relay_infrastructure::DohRelay;
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use http_body_util::BodyExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tower::ServiceExt;

/// Spawn a mock resolver that answers every query with one A record for the
/// name that was asked, echoing the transaction ID.
async fn spawn_mock_resolver() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let (n, peer) = match socket.recv_from(&mut buf).await {
                Ok(v) => v,
                Err(_) => return,
            };
            let query = match Message::from_vec(&buf[..n]) {
                Ok(m) => m,
                Err(_) => continue,
            };

            let mut response = Message::new();
            response.set_id(query.id());
            response.set_message_type(MessageType::Response);
            response.set_recursion_desired(query.recursion_desired());
            response.set_recursion_available(true);
            if let Some(q) = query.queries().first() {
                response.add_query(q.clone());
                response.add_answer(Record::from_rdata(
                    q.name().clone(),
                    60,
                    RData::A(A::new(192, 0, 2, 7)),
                ));
            }

            let bytes = response.to_vec().unwrap();
            let _ = socket.send_to(&bytes, peer).await;
        }
    });

    addr
}

fn create_test_app(upstream: SocketAddr, timeout: Duration) -> Router {
    let state = AppState {
        relay: Arc::new(DohRelay::new(upstream, timeout)),
    };
    create_routes(state)
}

fn dns_query_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/dns-query")
        .header(header::CONTENT_TYPE, "application/dns-message")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn well_formed_query_returns_dns_message_response() {
    let upstream = spawn_mock_resolver().await;
    let app = create_test_app(upstream, Duration::from_secs(1));

    let (id, query_bytes) = wire::build_query("example.com").unwrap();
    let response = app.oneshot(dns_query_request(query_bytes)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/dns-message"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let reply = Message::from_vec(&body).unwrap();

    assert_eq!(reply.id(), id);
    assert_eq!(reply.message_type(), MessageType::Response);
    assert_eq!(reply.queries()[0].name().to_utf8(), "example.com.");
    assert!(reply.answer_count() >= 1);
}

#[tokio::test]
async fn garbage_body_returns_500_with_empty_body() {
    let upstream = spawn_mock_resolver().await;
    let app = create_test_app(upstream, Duration::from_secs(1));

    let response = app
        .oneshot(dns_query_request(b"this is not dns".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn single_zero_byte_returns_500_with_empty_body() {
    let upstream = spawn_mock_resolver().await;
    let app = create_test_app(upstream, Duration::from_secs(1));

    let response = app.oneshot(dns_query_request(vec![0x00])).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn empty_body_returns_500_with_empty_body() {
    let upstream = spawn_mock_resolver().await;
    let app = create_test_app(upstream, Duration::from_secs(1));

    let response = app.oneshot(dns_query_request(Vec::new())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn silent_upstream_returns_500_within_the_timeout_window() {
    // Bound but never answered: the relay must give up on its own deadline
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let upstream = silent.local_addr().unwrap();

    let timeout = Duration::from_millis(200);
    let app = create_test_app(upstream, timeout);

    let (_, query_bytes) = wire::build_query("example.com").unwrap();

    let start = Instant::now();
    let response = app.oneshot(dns_query_request(query_bytes)).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        elapsed < Duration::from_secs(2),
        "handler hung for {:?}",
        elapsed
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn fifty_concurrent_queries_get_their_own_answers() {
    let upstream = spawn_mock_resolver().await;
    let app = create_test_app(upstream, Duration::from_secs(2));

    let mut tasks = Vec::new();
    for i in 0..50 {
        let app = app.clone();
        let domain = format!("host{}.example.com", i);
        tasks.push(tokio::spawn(async move {
            let (id, query_bytes) = wire::build_query(&domain).unwrap();
            let response = app.oneshot(dns_query_request(query_bytes)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = response.into_body().collect().await.unwrap().to_bytes();
            let reply = Message::from_vec(&body).unwrap();

            // Each in-flight request must get the reply to its own question
            assert_eq!(reply.id(), id, "cross-talk for {}", domain);
            assert_eq!(
                reply.queries()[0].name().to_utf8(),
                format!("{}.", domain),
                "wrong question echoed"
            );
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
}
