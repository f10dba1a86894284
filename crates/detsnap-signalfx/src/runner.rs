//! Export orchestration: fetch all detectors, write documents and summary

use std::path::PathBuf;
use std::time::Instant;

use crate::api::Client;
use crate::config::Config;
use crate::detector::Detector;
use crate::export::Exporter;

/// Run a full detector export.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let start = Instant::now();

    let client = Client::new(&config.token, &config.realm);
    log::info!("fetching detectors from {}", client.base_url());

    let outcome = client.fetch_all(config.limit);
    if let Some(e) = &outcome.error {
        if outcome.detectors.is_empty() {
            anyhow::bail!("failed to fetch detectors: {e}");
        }
        log::warn!(
            "pagination aborted early ({e}); exporting the {} detectors already fetched",
            outcome.detectors.len()
        );
    }

    export_fetched(&outcome.detectors, config, start)
}

/// Export an already-fetched collection and build the run summary.
///
/// An empty collection returns early; the output directory is only
/// created once there is something to write.
fn export_fetched(
    detectors: &[Detector],
    config: &Config,
    start: Instant,
) -> anyhow::Result<RunSummary> {
    if detectors.is_empty() {
        log::warn!("no detectors found");
        return Ok(RunSummary::empty());
    }

    let exporter = Exporter::new(&config.output_dir)?;
    let written = exporter.export_all(detectors);
    let summary_path = exporter.write_summary(detectors, &written)?;

    let summary = RunSummary {
        total_detectors: detectors.len(),
        exported: written.len(),
        failed: detectors.len() - written.len(),
        summary_path: Some(summary_path),
        elapsed: start.elapsed(),
    };

    summary.log();

    Ok(summary)
}

/// Summary of an export run
#[derive(Debug)]
pub struct RunSummary {
    pub total_detectors: usize,
    pub exported: usize,
    pub failed: usize,
    pub summary_path: Option<PathBuf>,
    pub elapsed: std::time::Duration,
}

impl RunSummary {
    pub fn empty() -> Self {
        Self {
            total_detectors: 0,
            exported: 0,
            failed: 0,
            summary_path: None,
            elapsed: std::time::Duration::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_detectors == 0
    }

    pub fn log(&self) {
        log::info!("=== Export Summary ===");
        log::info!(
            "Detectors: {}/{} exported ({} failed)",
            self.exported,
            self.total_detectors,
            self.failed
        );
        if let Some(path) = &self.summary_path {
            log::info!("Summary: {}", path.display());
        }
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}
