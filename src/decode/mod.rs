//! Structured decoders for values packed into a single string.
//!
//! This module handles:
//! - Connection URL decoding into a [`ConnectionDescriptor`]
//! - Scheme to engine mapping with per-engine default ports
//! - Password redaction for diagnostics

pub mod connection;
pub mod engine;

pub use connection::{ConnectionDescriptor, DecodeError, Password, decode_connection, redact_url};
pub use engine::Engine;
