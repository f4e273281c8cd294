//! Source adapters: one per ingress channel.
//!
//! A single polymorphic adapter covers every channel; behavior differs only
//! in the metadata injected alongside the decoded payload. The duplicated
//! per-channel handler bodies of earlier gateway revisions collapse into
//! this one type.

use std::collections::HashMap;

use crate::channel::ChannelId;
use crate::config::GatewayConfig;
use crate::envelope::{decode_permissive, Event};

/// Metadata key annotated onto lora events.
const LORA_GATEWAY_KEY: &str = "lora_gateway";
/// Fixed gateway identifier for lora ingress.
const LORA_GATEWAY_ID: &str = "lora-gw";

type AnnotateFn = fn(&GatewayConfig, &mut HashMap<String, String>);

/// Turns a transport-specific request body into a normalized [`Event`]
/// tagged with its channel.
#[derive(Debug, Clone, Copy)]
pub struct SourceAdapter {
    channel: ChannelId,
    annotate: Option<AnnotateFn>,
}

impl SourceAdapter {
    /// Adapter for the given channel, with its channel-specific annotation.
    pub fn for_channel(channel: ChannelId) -> Self {
        let annotate: Option<AnnotateFn> = match channel {
            ChannelId::Mqtt => Some(annotate_mqtt),
            ChannelId::Lora => Some(annotate_lora),
            _ => None,
        };
        Self { channel, annotate }
    }

    /// The channel this adapter produces events for.
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Decode a request body into an event.
    ///
    /// Decoding never fails: malformed bodies yield an empty payload and the
    /// request proceeds. The only request-shape validation the gateway does
    /// is method enforcement, handled by the routing layer.
    pub fn ingest(&self, config: &GatewayConfig, body: &[u8]) -> Event {
        let payload = decode_permissive(body);
        let mut metadata = HashMap::new();
        if let Some(annotate) = self.annotate {
            annotate(config, &mut metadata);
        }
        Event::new(self.channel, payload, metadata)
    }
}

fn annotate_mqtt(config: &GatewayConfig, metadata: &mut HashMap<String, String>) {
    // Empty broker is allowed: the annotation records what was configured,
    // not whether it was.
    metadata.insert("broker".to_string(), config.broker.clone());
}

fn annotate_lora(_config: &GatewayConfig, metadata: &mut HashMap<String, String>) {
    metadata.insert(LORA_GATEWAY_KEY.to_string(), LORA_GATEWAY_ID.to_string());
}
