//! Ingestion and diagnostic handlers.
//!
//! Every handler resolves to exactly one response envelope (or a verbatim
//! downstream relay on the universal path). Decode failures never abort a
//! request; only method mismatches and unknown channels do.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, error, info};

use oracle_gateway_core::{local, ChannelId, ForwardResult, ResponseEnvelope, SourceAdapter};

use crate::state::AppState;

/// Universal forward: the body is an opaque blob, relayed byte-identical so
/// any embedded signature or proof structure survives.
pub async fn oracle(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let body = match read_body(&state, request).await {
        Ok(body) => body,
        Err(response) => return response,
    };

    match state.dispatcher.forward_raw(body).await {
        ForwardResult::Local(event) => {
            info!("oracle request resolved locally ({} bytes)", event.payload.as_str().map_or(0, str::len));
            envelope_response(local::respond(&event))
        }
        ForwardResult::Remote { status, body } => relay_response(status, body),
        ForwardResult::Failure(err) => {
            error!("oracle forward failed: {err}");
            error_response(StatusCode::BAD_GATEWAY, "error-upstream", err.to_string())
        }
    }
}

/// Channel-specific IoT ingestion under `/iot/{channel}`.
pub async fn iot(
    State(state): State<Arc<AppState>>,
    Path(channel): Path<String>,
    request: Request,
) -> Response {
    let channel: ChannelId = match channel.parse() {
        Ok(channel) => channel,
        Err(err) => {
            return error_response(StatusCode::NOT_FOUND, "error-unknown-channel", err.to_string())
        }
    };
    let body = match read_body(&state, request).await {
        Ok(body) => body,
        Err(response) => return response,
    };
    ingest(&state, channel, &body).await
}

/// Manual submission from the UI; same pipeline as an IoT channel.
pub async fn manual_submit(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let body = match read_body(&state, request).await {
        Ok(body) => body,
        Err(response) => return response,
    };
    ingest(&state, ChannelId::Manual, &body).await
}

/// Diagnostic view of the manual endpoint.
pub async fn manual_info(State(state): State<Arc<AppState>>) -> Response {
    envelope_response(ResponseEnvelope::new(
        ChannelId::Manual.status_tag(),
        json!({
            "accepts": "POST application/json",
            "mode": mode(&state),
        }),
    ))
}

/// Service diagnostics for `/test`.
pub async fn service_info(State(state): State<Arc<AppState>>) -> Response {
    envelope_response(ResponseEnvelope::new(
        "ok",
        json!({
            "service": "oracle-gateway",
            "version": env!("CARGO_PKG_VERSION"),
            "mode": mode(&state),
            "channels": ChannelId::IOT.iter().map(ChannelId::as_str).collect::<Vec<_>>(),
        }),
    ))
}

/// Health check.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    envelope_response(ResponseEnvelope::new(
        "healthy",
        json!({
            "service": "oracle-gateway",
            "mode": mode(&state),
        }),
    ))
}

/// Run a normalized event through the dispatcher and wrap the outcome.
async fn ingest(state: &AppState, channel: ChannelId, body: &[u8]) -> Response {
    let event = SourceAdapter::for_channel(channel).ingest(&state.config, body);
    let wrapped = event.annotated_payload();
    let tag = channel.status_tag();

    match state.dispatcher.dispatch(event).await {
        ForwardResult::Local(_) => {
            debug!(channel = %channel, "event resolved locally");
            envelope_response(ResponseEnvelope::new(tag, wrapped))
        }
        ForwardResult::Remote { status, body } if (200..300).contains(&status) => {
            debug!(channel = %channel, status, "event accepted downstream ({} response bytes)", body.len());
            envelope_response(ResponseEnvelope::new(tag, wrapped))
        }
        // Downstream error semantics are not reinterpreted.
        ForwardResult::Remote { status, body } => relay_response(status, body),
        ForwardResult::Failure(err) => {
            error!(channel = %channel, "forward failed: {err}");
            error_response(StatusCode::BAD_GATEWAY, "error-upstream", err.to_string())
        }
    }
}

async fn read_body(state: &AppState, request: Request) -> Result<Bytes, Response> {
    axum::body::to_bytes(request.into_body(), state.config.body_limit)
        .await
        .map_err(|err| {
            error_response(StatusCode::BAD_REQUEST, "error-request", err.to_string())
        })
}

fn mode(state: &AppState) -> &'static str {
    if state.dispatcher.is_local() {
        "local"
    } else {
        "forwarding"
    }
}

pub(crate) fn envelope_response(envelope: ResponseEnvelope) -> Response {
    (StatusCode::OK, Json(envelope)).into_response()
}

pub(crate) fn error_response(
    code: StatusCode,
    tag: &str,
    detail: impl Into<String>,
) -> Response {
    (code, Json(ResponseEnvelope::error(tag, detail))).into_response()
}

/// Relay a downstream response verbatim, body byte-identical.
pub(crate) fn relay_response(status: u16, body: Bytes) -> Response {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    match Response::builder()
        .status(code)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
    {
        Ok(response) => response,
        Err(err) => {
            error!("relay response could not be built: {err}");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
