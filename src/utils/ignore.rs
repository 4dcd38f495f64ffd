//! Directory and file skip rules for package discovery
//!
//! Combines the Go tool's fixed rules (`testdata`, `vendor`, names starting with
//! `.` or `_`) with user-supplied glob patterns from `ScanConfig::exclude`.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::Path;
use tracing::debug;

/// Directory names the Go tool never treats as packages
pub fn is_ignored_dir_name(name: &str) -> bool {
    name == "testdata" || name == "vendor" || name.starts_with('.') || name.starts_with('_')
}

/// Compiled exclude patterns
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Compile glob patterns; an invalid pattern is a configuration error
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{}'", p)))
            .collect::<Result<Vec<_>>>()?;

        if !patterns.is_empty() {
            debug!("📋 Loaded {} exclude patterns", patterns.len());
        }

        Ok(Self { patterns })
    }

    /// Whether a relative Unix-style path matches any pattern
    pub fn is_excluded(&self, relative_unix: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(relative_unix))
    }

    pub fn is_excluded_path(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");
        self.is_excluded(&path_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_tool_rules() {
        assert!(is_ignored_dir_name("testdata"));
        assert!(is_ignored_dir_name("vendor"));
        assert!(is_ignored_dir_name(".git"));
        assert!(is_ignored_dir_name("_examples"));
        assert!(!is_ignored_dir_name("internal"));
        assert!(!is_ignored_dir_name("vendored"));
    }

    #[test]
    fn test_exclude_patterns() {
        let set = ExcludeSet::new(&["gen/**".to_string(), "*_mock.go".to_string()]).unwrap();
        assert!(set.is_excluded("gen/api/types.go"));
        assert!(set.is_excluded("user_mock.go"));
        assert!(!set.is_excluded("internal/models/user.go"));
        assert!(set.is_excluded_path(Path::new("gen/api")));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExcludeSet::default();
        assert!(!set.is_excluded("anything"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = ExcludeSet::new(&["[".to_string()]);
        assert!(result.is_err());
    }
}
