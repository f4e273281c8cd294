//! Forwarding dispatcher: local-vs-remote resolution and the single
//! outbound call to the downstream prover.
//!
//! Forwarding is at-most-once. Sensor data is not assumed safe to resend,
//! so a transport failure surfaces as a 502-equivalent with no retry.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::envelope::Event;
use crate::error::GatewayError;

/// Fixed downstream path appended to the configured base URL. A deployment
/// constant, never request-controlled.
pub const DOWNSTREAM_PATH: &str = "/oracle";

/// Outcome of dispatching one request. Produced exactly once per request.
#[derive(Debug)]
pub enum ForwardResult {
    /// No downstream configured; answered by the local fallback responder
    Local(Event),
    /// Downstream answered; status and body are relayed verbatim, whether
    /// or not the status is 2xx
    Remote {
        /// Downstream HTTP status code
        status: u16,
        /// Downstream response body, byte-identical
        body: Bytes,
    },
    /// Transport failure reaching the downstream (refused, DNS, timeout)
    Failure(GatewayError),
}

/// Performs the outbound forward for normalized events and opaque payloads.
///
/// Holds one HTTP client built at startup with the configured bounded
/// timeout; shared read-only across all in-flight requests.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    downstream_url: Option<String>,
}

impl Dispatcher {
    /// Build a dispatcher from the gateway configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.forward_timeout)
            .build()
            .map_err(|err| GatewayError::Config(format!("http client: {err}")))?;
        Ok(Self {
            client,
            downstream_url: config.downstream_url.clone(),
        })
    }

    /// True when no downstream prover is configured.
    pub fn is_local(&self) -> bool {
        self.downstream_url.is_none()
    }

    /// Dispatch a normalized event: forward its canonical bytes, or resolve
    /// locally when no downstream is configured.
    pub async fn dispatch(&self, event: Event) -> ForwardResult {
        if self.downstream_url.is_none() {
            debug!(channel = %event.source, "no downstream configured, resolving locally");
            return ForwardResult::Local(event);
        }
        let body = Bytes::from(event.canonical_bytes());
        self.forward(body).await
    }

    /// Forward an opaque payload byte-identical, preserving any embedded
    /// signature or proof structure the caller built.
    pub async fn forward_raw(&self, body: Bytes) -> ForwardResult {
        if self.downstream_url.is_none() {
            let event = Event::new(
                crate::channel::ChannelId::Universal,
                serde_json::Value::String(String::from_utf8_lossy(&body).into_owned()),
                Default::default(),
            );
            return ForwardResult::Local(event);
        }
        self.forward(body).await
    }

    async fn forward(&self, body: Bytes) -> ForwardResult {
        // Checked by both callers.
        let base = match self.downstream_url.as_deref() {
            Some(base) => base,
            None => return ForwardResult::Failure(GatewayError::Config("no downstream".into())),
        };
        let url = format!("{base}{DOWNSTREAM_PATH}");

        let response = match self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("downstream unreachable at {url}: {err}");
                return ForwardResult::Failure(GatewayError::DownstreamUnavailable(
                    err.to_string(),
                ));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => ForwardResult::Remote {
                status,
                body: bytes,
            },
            Err(err) => {
                warn!("downstream response body could not be read: {err}");
                ForwardResult::Failure(GatewayError::DownstreamUnavailable(err.to_string()))
            }
        }
    }
}
