//! Passthrough collaborators: price, weather, chain RPC and IPFS.
//!
//! Single-purpose I/O wrappers around external services. They share the
//! gateway's envelope and CORS contract at the boundary but carry no
//! normalization logic of their own.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use tracing::warn;

use oracle_gateway_core::{decode_permissive, ResponseEnvelope};

use crate::handlers::{envelope_response, error_response};
use crate::state::AppState;

/// Price quote passthrough; the query string is forwarded untouched.
pub async fn price(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let Some(base) = state.config.price_api_url.clone() else {
        return unconfigured("price");
    };
    fetch(&state, "price", &with_query(base, query), None).await
}

/// Weather passthrough; the query string is forwarded untouched.
pub async fn weather(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let Some(base) = state.config.weather_api_url.clone() else {
        return unconfigured("weather");
    };
    fetch(&state, "weather", &with_query(base, query), None).await
}

/// Chain RPC passthrough; the request body is forwarded as-is.
pub async fn chain(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let Some(url) = state.config.chain_rpc_url.clone() else {
        return unconfigured("chain");
    };
    fetch(&state, "chain", &url, Some(body)).await
}

/// IPFS content fetch through the configured public gateway.
pub async fn ipfs(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let Some(base) = state.config.ipfs_gateway_url.clone() else {
        return unconfigured("ipfs");
    };
    let url = format!("{}/ipfs/{}", base.trim_end_matches('/'), path);
    fetch(&state, "ipfs", &url, None).await
}

/// One bounded-timeout call, response wrapped in the envelope. A GET when
/// `body` is absent, a POST otherwise.
async fn fetch(state: &AppState, tag: &str, url: &str, body: Option<Bytes>) -> Response {
    let request = match body {
        Some(body) => state.client.post(url).body(body),
        None => state.client.get(url),
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("{tag} passthrough unreachable at {url}: {err}");
            return error_response(StatusCode::BAD_GATEWAY, "error-upstream", err.to_string());
        }
    };

    let status = response.status();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("{tag} passthrough body could not be read: {err}");
            return error_response(StatusCode::BAD_GATEWAY, "error-upstream", err.to_string());
        }
    };

    let data = decode_permissive(&bytes);
    if status.is_success() {
        envelope_response(ResponseEnvelope::new(tag, data))
    } else {
        error_response(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            &format!("error-{tag}"),
            data.to_string(),
        )
    }
}

fn with_query(base: String, query: Option<String>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{base}?{query}"),
        _ => base,
    }
}

fn unconfigured(tag: &str) -> Response {
    error_response(
        StatusCode::BAD_GATEWAY,
        "error-config",
        format!("{tag} passthrough has no upstream configured"),
    )
}
