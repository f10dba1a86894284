//! Detector wire model
//!
//! Detectors are opaque JSON documents; only `id` and `name` carry meaning
//! for this tool, everything else passes through untouched. Key order is
//! preserved from the API response so exported documents diff cleanly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single detector as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Detector(pub serde_json::Map<String, Value>);

impl Detector {
    /// Server-assigned detector ID, if present.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Human-readable display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

/// One page of the detector list endpoint.
#[derive(Debug, Deserialize)]
pub struct DetectorPage {
    /// Total detectors in the organization (not the page length).
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Detector>,
}

impl DetectorPage {
    /// Parse a page from the raw response body.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"{
        "count": 2,
        "results": [
            {"id": "AAAAAAAAAA", "name": "CPU High", "detectorOrigin": "Standard"},
            {"id": "BBBBBBBBBB", "name": "Memory Low"}
        ]
    }"#;

    #[test]
    fn parse_page() {
        let page = DetectorPage::from_json(SAMPLE_PAGE).unwrap();
        assert_eq!(page.count, Some(2));
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn detector_accessors() {
        let page = DetectorPage::from_json(SAMPLE_PAGE).unwrap();
        assert_eq!(page.results[0].id(), Some("AAAAAAAAAA"));
        assert_eq!(page.results[0].name(), Some("CPU High"));
    }

    #[test]
    fn detector_without_name() {
        let d: Detector = serde_json::from_str(r#"{"id": "CCCCCCCCCC"}"#).unwrap();
        assert_eq!(d.id(), Some("CCCCCCCCCC"));
        assert_eq!(d.name(), None);
    }

    #[test]
    fn non_string_name_treated_as_absent() {
        let d: Detector = serde_json::from_str(r#"{"name": 42}"#).unwrap();
        assert_eq!(d.name(), None);
    }

    #[test]
    fn page_without_results_field() {
        let page = DetectorPage::from_json(r#"{"count": 0}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn page_without_count_field() {
        let page = DetectorPage::from_json(r#"{"results": []}"#).unwrap();
        assert_eq!(page.count, None);
    }
}
