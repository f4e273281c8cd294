//! Error types for gateway operations.

use thiserror::Error;

/// Errors that can occur while normalizing or forwarding a request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed request body. Never fatal for ingestion routes, which
    /// decode permissively; surfaced only where strict decoding is asked for.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Unknown ingress channel in the request path
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// Request used a method the route does not accept
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Downstream prover could not be reached (refused, DNS, timeout)
    #[error("Downstream unavailable: {0}")]
    DownstreamUnavailable(String),

    /// Configuration errors, surfaced at startup only
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
