//! HTTP surface of the oracle gateway.
//!
//! Accepts heterogeneous event submissions (manual UI input, IoT sensor
//! reports, price/weather/chain/IPFS queries), normalizes them into the
//! uniform envelope and forwards them to the configured downstream prover,
//! or answers locally when none is configured.
//!
//! # Endpoints
//!
//! - `POST /oracle` - universal forward, body relayed byte-identical
//! - `POST /iot/{channel}` - channel-specific ingestion (wifi, ble, serial,
//!   mqtt, lora, gps, zigbee)
//! - `GET|POST /manual` - manual submission and diagnostics
//! - `GET|POST /test` - service diagnostics
//! - `GET|POST /health` - health check
//! - `GET /price`, `GET /weather`, `POST /chain`, `GET /ipfs/{path}` -
//!   passthrough collaborators
//! - `OPTIONS` on any path - answered at the CORS layer, empty 2xx

pub mod handlers;
pub mod passthrough;
pub mod state;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the gateway router with the CORS and trace layers applied.
///
/// The CORS layer sits outside routing so preflight requests are answered
/// before any handler logic runs; adapters may assume a real payload.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/oracle", post(handlers::oracle))
        .route("/iot/:channel", post(handlers::iot))
        .route("/manual", get(handlers::manual_info).post(handlers::manual_submit))
        .route("/test", get(handlers::service_info).post(handlers::service_info))
        .route("/health", get(handlers::health).post(handlers::health))
        .route("/price", get(passthrough::price))
        .route("/weather", get(passthrough::weather))
        .route("/chain", post(passthrough::chain))
        .route("/ipfs/*path", get(passthrough::ipfs))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}
