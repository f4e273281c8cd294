//! Shared helpers for driving the gateway router in tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use oracle_gateway::state::AppState;
use oracle_gateway_core::GatewayConfig;

/// Build the full gateway router over the given configuration.
pub fn router_with(config: GatewayConfig) -> Router {
    let state = AppState::new(config).expect("gateway state");
    oracle_gateway::build_router(Arc::new(state))
}

/// Spawn a mock downstream service on an ephemeral port; returns its base URL.
pub async fn spawn_downstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock downstream");
    let addr = listener.local_addr().expect("mock downstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock downstream");
    });
    format!("http://{addr}")
}

/// One request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.expect("router call")
}

/// POST a JSON body to a path.
pub async fn post_json(router: &Router, path: &str, body: &[u8]) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_vec()))
        .expect("request");
    send(router, request).await
}

/// GET a path.
pub async fn get(router: &Router, path: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request");
    send(router, request).await
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("json response body")
}
