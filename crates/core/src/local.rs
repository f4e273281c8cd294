//! Local fallback responder.
//!
//! When no downstream prover is configured the gateway still accepts every
//! submission and answers deterministically. No side effects, no network
//! access; this keeps the gateway testable and demoable on its own.

use crate::envelope::{Event, ResponseEnvelope};

/// Status tag for locally-resolved requests.
pub const LOCAL_STATUS: &str = "ok-local";

/// Build the "accepted, not forwarded" response for an event.
///
/// `data` is the event's raw payload, unmodified.
pub fn respond(event: &Event) -> ResponseEnvelope {
    ResponseEnvelope::new(LOCAL_STATUS, event.payload.clone())
}
