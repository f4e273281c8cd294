//! Ingress channel identifiers.
//!
//! Every request entering the gateway is attributed to exactly one channel.
//! The channel decides which adapter annotations apply and which status tag
//! the response envelope carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Closed set of ingress transports the gateway accepts events from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    /// Manual submission from the UI
    Manual,
    /// WiFi-connected sensor
    Wifi,
    /// Bluetooth Low Energy sensor
    Ble,
    /// Serial-attached device
    Serial,
    /// MQTT broker relay
    Mqtt,
    /// LoRa gateway relay
    Lora,
    /// GPS tracker
    Gps,
    /// Zigbee coordinator
    Zigbee,
    /// Opaque pre-built payload on the universal `/oracle` endpoint
    Universal,
}

impl ChannelId {
    /// All IoT transport channels reachable under `/iot/{channel}`.
    pub const IOT: [ChannelId; 7] = [
        ChannelId::Wifi,
        ChannelId::Ble,
        ChannelId::Serial,
        ChannelId::Mqtt,
        ChannelId::Lora,
        ChannelId::Gps,
        ChannelId::Zigbee,
    ];

    /// Lowercase channel name as it appears in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelId::Manual => "manual",
            ChannelId::Wifi => "wifi",
            ChannelId::Ble => "ble",
            ChannelId::Serial => "serial",
            ChannelId::Mqtt => "mqtt",
            ChannelId::Lora => "lora",
            ChannelId::Gps => "gps",
            ChannelId::Zigbee => "zigbee",
            ChannelId::Universal => "oracle",
        }
    }

    /// Status tag echoed in the response envelope for this channel.
    pub fn status_tag(&self) -> String {
        match self {
            ChannelId::Manual => "manual".to_string(),
            ChannelId::Universal => "oracle".to_string(),
            iot => format!("iot-{}", iot.as_str()),
        }
    }

    /// Whether this channel is an IoT transport.
    pub fn is_iot(&self) -> bool {
        !matches!(self, ChannelId::Manual | ChannelId::Universal)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelId {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ChannelId::Manual),
            "wifi" => Ok(ChannelId::Wifi),
            "ble" => Ok(ChannelId::Ble),
            "serial" => Ok(ChannelId::Serial),
            "mqtt" => Ok(ChannelId::Mqtt),
            "lora" => Ok(ChannelId::Lora),
            "gps" => Ok(ChannelId::Gps),
            "zigbee" => Ok(ChannelId::Zigbee),
            other => Err(GatewayError::UnknownChannel(other.to_string())),
        }
    }
}
