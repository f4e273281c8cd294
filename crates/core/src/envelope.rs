//! Event model and the uniform response envelope.
//!
//! Every endpoint answers with the same `{status, timestamp, data}` wrapper.
//! Decoding of inbound bodies is deliberately permissive: a sensor report is
//! never rejected solely for an odd-shaped payload. Malformed or empty bodies
//! decode to an empty JSON object and processing continues.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::channel::ChannelId;

/// A normalized event produced by a source adapter.
///
/// Immutable once constructed; lives only for the duration of the request
/// that carried it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Channel the event arrived on
    pub source: ChannelId,
    /// Reporting device identifier (empty when the payload names none)
    pub device: String,
    /// Decoded request payload
    pub payload: Value,
    /// Channel-specific annotations (broker name, gateway id)
    pub metadata: HashMap<String, String>,
}

impl Event {
    /// Build an event from an already-decoded payload.
    ///
    /// The device identifier is lifted from the payload's `device` field
    /// when present.
    pub fn new(source: ChannelId, payload: Value, metadata: HashMap<String, String>) -> Self {
        let device = payload
            .get("device")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            source,
            device,
            payload,
            metadata,
        }
    }

    /// Payload with channel metadata merged in.
    ///
    /// Metadata keys are inserted alongside the payload's own fields. A
    /// non-object payload with metadata attached yields a fresh object
    /// holding just the metadata, keeping the permissive-decode contract.
    pub fn annotated_payload(&self) -> Value {
        if self.metadata.is_empty() {
            return self.payload.clone();
        }
        let mut map = match &self.payload {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };
        for (key, value) in &self.metadata {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }

    /// Canonical JSON bytes forwarded to the downstream prover.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // Event serialization cannot fail: every field is JSON-representable.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// The uniform wrapper returned from every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Channel-derived tag (e.g. `iot-mqtt`) or an error tag
    pub status: String,
    /// RFC3339 timestamp captured when the envelope was built
    pub timestamp: String,
    /// Endpoint-specific payload, reproduced losslessly
    pub data: Value,
}

impl ResponseEnvelope {
    /// Wrap `data` under `status`, stamping the current time.
    pub fn new(status: impl Into<String>, data: Value) -> Self {
        Self {
            status: status.into(),
            timestamp: Utc::now().to_rfc3339(),
            data,
        }
    }

    /// Error envelope carrying a human-readable detail string.
    pub fn error(tag: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(tag, Value::String(detail.into()))
    }

    /// Encode to JSON bytes. Always valid JSON.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Decode a request body, tolerating malformed input.
///
/// Invalid or empty bodies become an empty JSON object rather than an error.
/// This favors availability over strict validation: the gateway accepts
/// whatever the sensor managed to send.
pub fn decode_permissive(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_slice(body).unwrap_or_else(|err| {
        tracing::debug!("permissive decode fell back to empty payload: {err}");
        Value::Object(Map::new())
    })
}
