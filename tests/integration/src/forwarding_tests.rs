//! Forwarding mode: a downstream prover is configured.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use serde_json::{json, Value};

use oracle_gateway_core::GatewayConfig;

use crate::test_utils::{body_bytes, body_json, post_json, router_with, spawn_downstream};

/// Downstream that echoes whatever it was sent.
fn echo_downstream() -> Router {
    Router::new().route("/oracle", post(|body: Bytes| async move { (StatusCode::OK, body) }))
}

/// Downstream that rejects every submission with a teapot.
fn rejecting_downstream() -> Router {
    Router::new().route(
        "/oracle",
        post(|| async { (StatusCode::IM_A_TEAPOT, r#"{"error":"prover rejected"}"#) }),
    )
}

#[tokio::test]
async fn test_oracle_relays_downstream_body_byte_identical() {
    let base = spawn_downstream(echo_downstream()).await;
    let router = router_with(GatewayConfig::with_downstream(base));

    let body = br#"{"event":"x","payload":"abc","device":"d1","sig":"deadbeef"}"#;
    let response = post_json(&router, "/oracle", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], &body[..]);
}

#[tokio::test]
async fn test_oracle_relays_downstream_error_verbatim() {
    let base = spawn_downstream(rejecting_downstream()).await;
    let router = router_with(GatewayConfig::with_downstream(base));

    let response = post_json(&router, "/oracle", b"{}").await;
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(
        &body_bytes(response).await[..],
        br#"{"error":"prover rejected"}"#
    );
}

#[tokio::test]
async fn test_iot_accepted_downstream_wraps_normalized_event() {
    let base = spawn_downstream(echo_downstream()).await;
    let router = router_with(GatewayConfig::with_downstream(base));

    let response = post_json(&router, "/iot/gps", br#"{"lat": 48.2, "lon": 16.4}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let envelope = body_json(response).await;
    assert_eq!(envelope["status"], "iot-gps");
    assert_eq!(envelope["data"], json!({"lat": 48.2, "lon": 16.4}));
}

#[tokio::test]
async fn test_iot_downstream_error_passed_through() {
    let base = spawn_downstream(rejecting_downstream()).await;
    let router = router_with(GatewayConfig::with_downstream(base));

    let response = post_json(&router, "/iot/serial", br#"{"baud": 9600}"#).await;
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(
        &body_bytes(response).await[..],
        br#"{"error":"prover rejected"}"#
    );
}

#[tokio::test]
async fn test_downstream_receives_canonical_event_bytes() {
    let captured: Arc<Mutex<Option<Bytes>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let downstream = Router::new().route(
        "/oracle",
        post(move |body: Bytes| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                StatusCode::OK.into_response()
            }
        }),
    );
    let base = spawn_downstream(downstream).await;

    let mut config = GatewayConfig::with_downstream(base);
    config.broker = "broker.local".to_string();
    let router = router_with(config);

    post_json(&router, "/iot/mqtt", br#"{"temp": 21.5, "device": "d1"}"#).await;

    let forwarded = captured.lock().unwrap().clone().expect("downstream was called");
    let event: Value = serde_json::from_slice(&forwarded).expect("canonical event json");
    assert_eq!(event["source"], "mqtt");
    assert_eq!(event["device"], "d1");
    assert_eq!(event["payload"], json!({"temp": 21.5, "device": "d1"}));
    assert_eq!(event["metadata"]["broker"], "broker.local");
}

#[tokio::test]
async fn test_unreachable_downstream_is_bad_gateway_everywhere() {
    // Closed port: connection refused immediately, well inside the timeout.
    let mut config = GatewayConfig::with_downstream("http://127.0.0.1:9");
    config.forward_timeout = Duration::from_secs(2);
    let router = router_with(config);

    let response = post_json(&router, "/oracle", b"{}").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let envelope = body_json(response).await;
    assert_eq!(envelope["status"], "error-upstream");

    let response = post_json(&router, "/iot/wifi", br#"{"rssi": -40}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
