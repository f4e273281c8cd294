//! Core types and forwarding logic for the oracle gateway.
//!
//! This crate provides the request-normalization pipeline shared by the
//! gateway service:
//! - Channel identifiers for every ingress transport
//! - The event model and the uniform response envelope
//! - Source adapters that turn raw request bodies into normalized events
//! - The forwarding dispatcher (remote prover or local fallback)
//! - Environment-sourced gateway configuration
//!
//! # Architecture
//!
//! Requests flow through the following pipeline:
//! 1. Body received by an HTTP handler in the gateway service
//! 2. `SourceAdapter` decodes it (permissively) into an [`Event`]
//! 3. [`Dispatcher`] resolves local-vs-remote and performs at most one
//!    outbound forward to the configured prover
//! 4. The outcome is mapped onto a single [`ResponseEnvelope`]
//!
//! The gateway holds no mutable state after startup: [`GatewayConfig`] is
//! read once from the environment and passed by reference into the
//! dispatcher and adapters.

pub mod adapter;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod local;
pub mod logging;

pub use adapter::SourceAdapter;
pub use channel::ChannelId;
pub use config::GatewayConfig;
pub use dispatch::{Dispatcher, ForwardResult};
pub use envelope::{decode_permissive, Event, ResponseEnvelope};
pub use error::{GatewayError, GatewayResult};
