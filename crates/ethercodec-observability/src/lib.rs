//! # ethercodec-observability
//!
//! Structured logging for the ethercodec crates.
//!
//! The codec crates emit `tracing` events at their boundaries (ABI load,
//! call encode, event match, signing, recovery, batch decode). This crate
//! installs a subscriber for them: human-readable text or JSON lines, with
//! log levels configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
