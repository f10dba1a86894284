//! Export run configuration

use std::path::PathBuf;

use crate::api::DEFAULT_REALM;

/// Runtime configuration for a detector export run.
#[derive(Debug, Clone)]
pub struct Config {
    /// SignalFx org access token.
    pub token: String,
    /// API realm (us0, us1, eu0, ...).
    pub realm: String,
    /// Directory receiving the exported documents.
    pub output_dir: PathBuf,
    /// Maximum number of detectors to export (None for all).
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            realm: DEFAULT_REALM.to_string(),
            output_dir: PathBuf::from("./alerts"),
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.realm, "us0");
        assert_eq!(config.output_dir, PathBuf::from("./alerts"));
        assert!(config.limit.is_none());
        assert!(config.token.is_empty());
    }
}
