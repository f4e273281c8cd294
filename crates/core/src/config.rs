//! Environment-sourced gateway configuration.
//!
//! Read once at startup and passed by reference into the dispatcher and
//! adapters. Handlers never touch the process environment directly, so tests
//! can inject arbitrary configurations (including "no downstream").

use std::env;
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};

const DEFAULT_PORT: u16 = 7070;
const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BODY_LIMIT: usize = 65536;

/// Process-wide gateway configuration. Immutable after startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP listen port
    pub port: u16,
    /// Base URL of the downstream prover. `None` switches the whole process
    /// into local-fallback mode.
    pub downstream_url: Option<String>,
    /// Broker name annotated onto mqtt events (may be empty)
    pub broker: String,
    /// Upper bound on the outbound forward call
    pub forward_timeout: Duration,
    /// Maximum accepted request body size in bytes
    pub body_limit: usize,
    /// Price quote passthrough target
    pub price_api_url: Option<String>,
    /// Weather passthrough target
    pub weather_api_url: Option<String>,
    /// Chain RPC passthrough target
    pub chain_rpc_url: Option<String>,
    /// IPFS gateway passthrough target
    pub ipfs_gateway_url: Option<String>,
}

impl GatewayConfig {
    /// Load configuration from the environment.
    ///
    /// A missing `PRIVATE_ORACLE_URL` is not an error here: the gateway
    /// starts in local mode and the caller logs a warning. Deployments that
    /// must not serve local traffic set `ORACLE_REQUIRE_DOWNSTREAM=1` and
    /// call [`GatewayConfig::require_downstream`] at startup.
    pub fn from_env() -> Self {
        GatewayConfig {
            port: env_parsed("PORT", DEFAULT_PORT),
            downstream_url: env_opt("PRIVATE_ORACLE_URL"),
            broker: env::var("MQTT_BROKER").unwrap_or_default(),
            forward_timeout: Duration::from_secs(env_parsed(
                "FORWARD_TIMEOUT_SECS",
                DEFAULT_FORWARD_TIMEOUT_SECS,
            )),
            body_limit: env_parsed("BODY_LIMIT", DEFAULT_BODY_LIMIT),
            price_api_url: env_opt("PRICE_API_URL"),
            weather_api_url: env_opt("WEATHER_API_URL"),
            chain_rpc_url: env_opt("CHAIN_RPC_URL"),
            ipfs_gateway_url: env_opt("IPFS_GATEWAY_URL"),
        }
    }

    /// Whether the strict single-endpoint deployment variant was requested.
    pub fn downstream_required() -> bool {
        matches!(env::var("ORACLE_REQUIRE_DOWNSTREAM").as_deref(), Ok("1") | Ok("true"))
    }

    /// Fail fast when the deployment mandates a downstream prover.
    pub fn require_downstream(&self) -> GatewayResult<&str> {
        self.downstream_url.as_deref().ok_or_else(|| {
            GatewayError::Config(
                "PRIVATE_ORACLE_URL is not set but this deployment requires a downstream prover"
                    .to_string(),
            )
        })
    }

    /// True when no downstream prover is configured.
    pub fn is_local_mode(&self) -> bool {
        self.downstream_url.is_none()
    }

    /// Configuration for tests and demos: local mode, defaults everywhere.
    pub fn local() -> Self {
        GatewayConfig {
            port: DEFAULT_PORT,
            downstream_url: None,
            broker: String::new(),
            forward_timeout: Duration::from_secs(DEFAULT_FORWARD_TIMEOUT_SECS),
            body_limit: DEFAULT_BODY_LIMIT,
            price_api_url: None,
            weather_api_url: None,
            chain_rpc_url: None,
            ipfs_gateway_url: None,
        }
    }

    /// Local-mode configuration pointed at a given downstream base URL.
    pub fn with_downstream(url: impl Into<String>) -> Self {
        GatewayConfig {
            downstream_url: Some(url.into()),
            ..GatewayConfig::local()
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
