//! Detsnap Core - shared infrastructure for the detector export pipeline
//!
//! This crate provides the HTTP plumbing (shared client, runtime bridge,
//! error type) and the logging setup used by the SignalFx client and the CLI.

pub mod http;
pub mod logging;

// Re-exports for convenience
pub use http::{HttpError, SHARED_RUNTIME, http_client};
pub use logging::init_logging;
