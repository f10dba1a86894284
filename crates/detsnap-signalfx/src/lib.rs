//! Detsnap SignalFx - detector retrieval and export
//!
//! This crate provides the client and exporter for snapshotting Splunk
//! Observability Cloud (SignalFx) alert detectors to YAML documents.
//!
//! # Example
//!
//! ```no_run
//! use detsnap_signalfx::{Config, run};
//!
//! let config = Config {
//!     token: "org-token".to_string(),
//!     ..Default::default()
//! };
//!
//! let summary = run(&config).expect("export failed");
//! println!("exported {} detectors", summary.exported);
//! ```

pub mod api;
pub mod config;
pub mod detector;
pub mod export;
pub mod runner;

// Re-exports for convenience
pub use api::{Client, DEFAULT_REALM, FetchOutcome, PAGE_SIZE, base_url_for_realm, paginate};
pub use config::Config;
pub use detector::{Detector, DetectorPage};
pub use export::{
    EXCLUDED_FIELDS, EXPORT_TOOL, Exporter, SUMMARY_FILENAME, clean_detector, export_filename,
};
pub use runner::{RunSummary, run};
