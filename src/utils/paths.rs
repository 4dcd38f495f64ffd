// Path Conversion Utilities
//
// Converts native paths below a scan root into relative Unix-style paths, the
// form used for import-path suffixes and for `PackageModel::file_path`.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path below `root` to a relative Unix-style path (with `/` separators)
///
/// # Examples
/// ```text
/// to_relative_unix_style("/home/me/project/internal/models", "/home/me/project")
/// // => "internal/models"
/// ```
///
/// Returns an empty string when `path` is `root` itself, and an error when it
/// lies outside `root`.
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    // Canonicalize both to see through symlinks; fall back to the originals
    let (path_to_use, root_to_use) = match (path.canonicalize(), root.canonicalize()) {
        (Ok(canonical_path), Ok(canonical_root)) => (canonical_path, canonical_root),
        _ => (path.to_path_buf(), root.to_path_buf()),
    };

    let relative = path_to_use.strip_prefix(&root_to_use).with_context(|| {
        format!(
            "Path '{}' is not within root '{}'",
            path_to_use.display(),
            root_to_use.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Join an import path prefix and a relative Unix-style suffix
pub fn join_import_path(prefix: &str, relative: &str) -> String {
    match (prefix.is_empty(), relative.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => relative.to_string(),
        (false, false) => format!("{}/{}", prefix.trim_end_matches('/'), relative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_linux_absolute_to_relative() {
        let root = PathBuf::from("/home/gopher/project");
        let absolute = PathBuf::from("/home/gopher/project/internal/models");

        let result = to_relative_unix_style(&absolute, &root).unwrap();

        assert_eq!(result, "internal/models");
        assert!(!result.contains('\\'), "Should have no backslashes");
    }

    #[test]
    fn test_root_itself_is_empty() {
        let root = PathBuf::from("/home/gopher/project");
        assert_eq!(to_relative_unix_style(&root, &root).unwrap(), "");
    }

    #[test]
    fn test_path_outside_root_fails() {
        let root = PathBuf::from("/home/gopher/project");
        let outside = PathBuf::from("/etc/passwd");

        let result = to_relative_unix_style(&outside, &root);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not within root"));
    }

    #[test]
    fn test_unicode_in_paths() {
        let root = PathBuf::from("/home/gopher/プロジェクト");
        let absolute = PathBuf::from("/home/gopher/プロジェクト/模型");

        let result = to_relative_unix_style(&absolute, &root).unwrap();

        assert_eq!(result, "模型");
    }

    #[test]
    fn test_join_import_path() {
        assert_eq!(join_import_path("example.com/demo", ""), "example.com/demo");
        assert_eq!(
            join_import_path("example.com/demo", "internal/models"),
            "example.com/demo/internal/models"
        );
        assert_eq!(join_import_path("", "internal"), "internal");
        assert_eq!(join_import_path("example.com/", "a"), "example.com/a");
    }
}
