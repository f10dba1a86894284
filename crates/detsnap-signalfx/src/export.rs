//! Detector export: field filtering, filename derivation, YAML documents
//!
//! One YAML document per detector plus an `export_summary.yaml` per run.
//! Server-managed fields are stripped so the documents can live in version
//! control and be re-applied elsewhere.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::detector::Detector;

/// Tool identifier recorded in every document's metadata.
pub const EXPORT_TOOL: &str = "detsnap";

/// Filename of the per-run summary document.
pub const SUMMARY_FILENAME: &str = "export_summary.yaml";

/// Server-managed fields stripped from every detector before serialization.
pub const EXCLUDED_FIELDS: [&str; 8] = [
    "id",
    "createdOn",
    "lastUpdateUserId",
    "lastUpdatedOn",
    "createdBy",
    "lastUpdateTime",
    "updateTime",
    "createTime",
];

/// Fallback display name for detectors without one.
const UNNAMED: &str = "unnamed";

/// Export metadata attached to every document.
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub original_id: Option<String>,
    pub export_tool: &'static str,
}

/// Per-detector output document.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub detector: serde_json::Map<String, Value>,
}

/// Statistics block of the summary document.
#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub exported_at: DateTime<Utc>,
    pub total_detectors: usize,
    pub successfully_exported: usize,
    pub failed_exports: usize,
    pub export_tool: &'static str,
}

/// Per-run summary document.
#[derive(Debug, Serialize)]
pub struct SummaryDocument {
    pub export_summary: SummaryStats,
    pub exported_files: Vec<String>,
    /// Names of every attempted record, including failed ones; `null` for
    /// detectors without a name.
    pub detector_names: Vec<Option<String>>,
}

/// Strip the server-managed fields; everything else passes through
/// unchanged, nested structures included. Key order is preserved.
pub fn clean_detector(detector: &Detector) -> serde_json::Map<String, Value> {
    detector
        .0
        .iter()
        .filter(|(key, _)| !EXCLUDED_FIELDS.contains(&key.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Derive the output filename from the detector's display name.
///
/// Keeps alphanumerics, `-`, `_`, and spaces; trims the ends, then turns
/// each remaining space into an underscore.
pub fn export_filename(detector: &Detector) -> String {
    let name = detector.name().unwrap_or(UNNAMED);
    let safe: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    let safe = safe.trim().replace(' ', "_");
    format!("{safe}.yaml")
}

/// Writes cleaned detector documents into one output directory.
#[derive(Debug)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Create the exporter and its output directory.
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Directory documents are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export a single detector; returns the written path.
    pub fn export_detector(&self, detector: &Detector) -> Result<PathBuf> {
        let document = ExportDocument {
            metadata: ExportMetadata {
                exported_at: Utc::now(),
                original_id: detector.id().map(String::from),
                export_tool: EXPORT_TOOL,
            },
            detector: clean_detector(detector),
        };

        let path = self.output_dir.join(export_filename(detector));
        let yaml = serde_yaml::to_string(&document).context("cannot serialize detector")?;
        std::fs::write(&path, yaml).with_context(|| format!("cannot write {}", path.display()))?;

        log::info!(
            "exported detector '{}' to {}",
            detector.name().unwrap_or(UNNAMED),
            path.display()
        );
        Ok(path)
    }

    /// Export every detector, skipping individual failures.
    ///
    /// Records that normalize to the same filename overwrite each other;
    /// a collision is logged but not resolved.
    pub fn export_all(&self, detectors: &[Detector]) -> Vec<PathBuf> {
        let mut written = Vec::new();
        let mut seen = HashSet::new();

        for detector in detectors {
            let filename = export_filename(detector);
            if !seen.insert(filename.clone()) {
                log::warn!("filename collision: {filename} is overwritten by a later detector");
            }
            match self.export_detector(detector) {
                Ok(path) => written.push(path),
                Err(e) => {
                    log::error!(
                        "failed to export detector '{}': {e:#}",
                        detector.name().unwrap_or(UNNAMED)
                    );
                }
            }
        }
        written
    }

    /// Write the run summary; returns its path.
    pub fn write_summary(&self, detectors: &[Detector], written: &[PathBuf]) -> Result<PathBuf> {
        let summary = SummaryDocument {
            export_summary: SummaryStats {
                exported_at: Utc::now(),
                total_detectors: detectors.len(),
                successfully_exported: written.len(),
                failed_exports: detectors.len().saturating_sub(written.len()),
                export_tool: EXPORT_TOOL,
            },
            exported_files: written.iter().map(|p| p.display().to_string()).collect(),
            detector_names: detectors
                .iter()
                .map(|d| d.name().map(String::from))
                .collect(),
        };

        let path = self.output_dir.join(SUMMARY_FILENAME);
        let yaml = serde_yaml::to_string(&summary).context("cannot serialize summary")?;
        std::fs::write(&path, yaml).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(path)
    }
}
