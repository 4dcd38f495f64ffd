// Utilities Module
//
// Common helpers shared by the loader and the scanner.

use anyhow::Result;
use std::path::Path;

/// File utilities
pub mod file_utils {
    use super::*;
    use crate::language::GO_EXTENSION;
    use anyhow::Context;
    use std::fs;

    /// Check if a file is a Go source the loader should consider
    pub fn is_go_source(path: &Path, include_tests: bool) -> bool {
        let is_go = path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION);
        if !is_go {
            return false;
        }
        let is_test = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("_test.go"));
        include_tests || !is_test
    }

    /// Read file content safely
    pub fn read_file_content(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

pub mod ignore;
pub mod paths;

#[cfg(test)]
mod tests {
    use super::file_utils::is_go_source;
    use std::path::Path;

    #[test]
    fn test_is_go_source() {
        assert!(is_go_source(Path::new("a/user.go"), false));
        assert!(!is_go_source(Path::new("a/user_test.go"), false));
        assert!(is_go_source(Path::new("a/user_test.go"), true));
        assert!(!is_go_source(Path::new("a/README.md"), true));
        assert!(!is_go_source(Path::new("a/go"), true));
    }
}
