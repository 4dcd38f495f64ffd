//! Scan configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Options controlling package discovery and extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Also load `_test.go` files
    pub include_tests: bool,
    /// Extract packages on the rayon thread pool
    pub parallel: bool,
    /// Glob patterns (relative, Unix-style) for directories or files to skip
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            parallel: true,
            exclude: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Load a configuration from JSON; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scan configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert!(!config.include_tests);
        assert!(config.parallel);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScanConfig::from_json_str(r#"{"exclude": ["gen/**"]}"#).unwrap();
        assert_eq!(config.exclude, vec!["gen/**".to_string()]);
        assert!(config.parallel);
        assert!(!config.include_tests);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ScanConfig::from_json_str("{\"parallel\": \"yes\"}").is_err());
    }
}
