//! Integration tests for the oracle gateway HTTP surface.
//!
//! This test suite validates:
//! - Envelope wrapping and permissive decoding on every ingestion route
//! - Local fallback mode when no downstream prover is configured
//! - Byte-identical relay and verbatim error pass-through when one is
//! - CORS boundary behavior, preflight included

pub mod test_utils;


#[cfg(test)]
mod forwarding_tests;
