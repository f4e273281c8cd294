//! Shared application state.

use oracle_gateway_core::{Dispatcher, GatewayConfig, GatewayError};

/// Read-only state shared across all in-flight requests. Constructed once
/// at startup; no locking needed.
pub struct AppState {
    /// Process-wide configuration
    pub config: GatewayConfig,
    /// Forwarding dispatcher for normalized events and opaque payloads
    pub dispatcher: Dispatcher,
    /// Client for the passthrough collaborators, same bounded timeout
    pub client: reqwest::Client,
}

impl AppState {
    /// Build the state from a loaded configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let dispatcher = Dispatcher::new(&config)?;
        let client = reqwest::Client::builder()
            .timeout(config.forward_timeout)
            .build()
            .map_err(|err| GatewayError::Config(format!("http client: {err}")))?;
        Ok(AppState {
            config,
            dispatcher,
            client,
        })
    }
}
