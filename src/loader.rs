//! Package Loader - discovers Go packages below root paths and parses their files
//!
//! A root pattern is a directory, optionally suffixed with `/...` to include
//! every sub-directory. Each directory holding Go sources becomes one
//! `LoadedPackage` whose files are parsed with tree-sitter up front.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::extractors::base::PackageRef;
use crate::language::{parse_go_source, SourceFile};
use crate::utils::file_utils::{is_go_source, read_file_content};
use crate::utils::ignore::{is_ignored_dir_name, ExcludeSet};
use crate::utils::paths::{join_import_path, to_relative_unix_style};

/// Pattern used when no roots are given
pub const DEFAULT_PATTERN: &str = "./...";

const RECURSIVE_SUFFIX: &str = "...";

/// One Go package: a directory and its parsed sources
#[derive(Debug)]
pub struct LoadedPackage {
    /// Loader identifier (the import path)
    pub id: String,
    /// Short name from the `package` clause
    pub name: String,
    pub import_path: String,
    pub dir: PathBuf,
    /// Parsed sources in file-name order
    pub files: Vec<SourceFile>,
}

impl LoadedPackage {
    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.import_path.clone(), self.name.clone())
    }
}

/// Load every package matched by `patterns`.
///
/// A root that does not exist or is not a directory fails the whole call.
pub fn load_roots(patterns: &[String], config: &ScanConfig) -> Result<Vec<LoadedPackage>> {
    let default_patterns = [DEFAULT_PATTERN.to_string()];
    let patterns = if patterns.is_empty() {
        &default_patterns[..]
    } else {
        patterns
    };

    let excludes = ExcludeSet::new(&config.exclude)?;
    let mut seen = HashSet::new();
    let mut packages = Vec::new();

    for pattern in patterns {
        let (root, recursive) = split_pattern(pattern);
        if !root.is_dir() {
            bail!("Root path '{}' does not exist or is not a directory", pattern);
        }
        let root = root
            .canonicalize()
            .with_context(|| format!("Cannot resolve root path '{}'", pattern))?;

        let mut dirs = vec![root.clone()];
        if recursive {
            collect_sub_dirs(&root, &root, &excludes, &mut dirs)?;
        }

        for dir in dirs {
            if !seen.insert(dir.clone()) {
                continue;
            }
            if let Some(package) = load_dir(&dir, &root, &excludes, config)? {
                packages.push(package);
            }
        }
    }

    debug!("Loaded {} packages from {:?}", packages.len(), patterns);
    Ok(packages)
}

/// `dir/...` -> (`dir`, true); `...` alone means the current directory
fn split_pattern(pattern: &str) -> (PathBuf, bool) {
    match pattern.strip_suffix(RECURSIVE_SUFFIX) {
        Some(rest) => {
            let rest = rest.trim_end_matches(['/', '\\']);
            let root = if rest.is_empty() { "." } else { rest };
            (PathBuf::from(root), true)
        }
        None => (PathBuf::from(pattern), false),
    }
}

/// Depth-first, name-ordered list of package candidate directories
fn collect_sub_dirs(
    dir: &Path,
    root: &Path,
    excludes: &ExcludeSet,
    out: &mut Vec<PathBuf>,
) -> Result<()> {
    for path in sorted_entries(dir)? {
        if !path.is_dir() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if is_ignored_dir_name(name) {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(root) {
            if excludes.is_excluded_path(relative) {
                debug!("Excluded directory {}", path.display());
                continue;
            }
        }
        out.push(path.clone());
        collect_sub_dirs(&path, root, excludes, out)?;
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    entries.sort();
    Ok(entries)
}

fn load_dir(
    dir: &Path,
    root: &Path,
    excludes: &ExcludeSet,
    config: &ScanConfig,
) -> Result<Option<LoadedPackage>> {
    let sources: Vec<PathBuf> = sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_go_source(p, config.include_tests))
        .filter(|p| match p.strip_prefix(root) {
            Ok(relative) => !excludes.is_excluded_path(relative),
            Err(_) => true,
        })
        .collect();

    if sources.is_empty() {
        return Ok(None);
    }

    let (import_root, import_prefix) = match find_module(dir)? {
        Some(module) => module,
        None => {
            let prefix = root
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            (root.to_path_buf(), prefix)
        }
    };

    let relative_dir = to_relative_unix_style(dir, &import_root)?;
    let import_path = join_import_path(&import_prefix, &relative_dir);

    let mut files = Vec::with_capacity(sources.len());
    for source in &sources {
        let content = read_file_content(source)?;
        let relative = to_relative_unix_style(source, &import_root)?;
        files.push(parse_go_source(&relative, content)?);
    }

    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let name = files
        .iter()
        .find_map(declared_package_name)
        .unwrap_or(dir_name);

    for file in &files {
        if let Some(other) = declared_package_name(file) {
            if other != name {
                warn!(
                    "{} declares package '{}' but '{}' was expected",
                    file.path, other, name
                );
            }
        }
    }

    debug!(
        "Loaded package {} ({} files) from {}",
        import_path,
        files.len(),
        dir.display()
    );

    Ok(Some(LoadedPackage {
        id: import_path.clone(),
        name,
        import_path,
        dir: dir.to_path_buf(),
        files,
    }))
}

/// Nearest enclosing module: (module root directory, module path)
fn find_module(dir: &Path) -> Result<Option<(PathBuf, String)>> {
    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let content = read_file_content(&go_mod)?;
        return match module_path(&content) {
            Some(module) => Ok(Some((ancestor.to_path_buf(), module))),
            None => bail!("{} has no module directive", go_mod.display()),
        };
    }
    Ok(None)
}

fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.split("//").next()?.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

/// Name from the file's `package` clause
fn declared_package_name(file: &SourceFile) -> Option<String> {
    let root = file.tree.root_node();
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause")?;
    let mut clause_cursor = clause.walk();
    let ident = clause
        .named_children(&mut clause_cursor)
        .find(|n| n.kind() == "package_identifier")?;
    let name = ident.utf8_text(file.content.as_bytes()).ok()?.to_string();
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn module_fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "go.mod", "module example.com/demo\n\ngo 1.21\n");
        write(root, "main.go", "package main\n\nfunc main() {}\n");
        write(
            root,
            "internal/models/user.go",
            "package models\n\n// User is stored.\ntype User struct{}\n",
        );
        write(
            root,
            "internal/models/user_test.go",
            "package models\n\ntype Fixture struct{}\n",
        );
        write(root, "internal/models/testdata/x.go", "package testdata\n");
        write(root, "vendor/github.com/x/y/y.go", "package y\n");
        write(root, ".hidden/h.go", "package hidden\n");
        write(root, "docs/README.md", "# docs\n");
        temp
    }

    fn pattern(root: &Path, suffix: &str) -> String {
        format!("{}{}", root.display(), suffix)
    }

    #[test]
    fn test_recursive_load_uses_module_path() {
        let temp = module_fixture();
        let packages =
            load_roots(&[pattern(temp.path(), "/...")], &ScanConfig::default()).unwrap();

        let paths: Vec<&str> = packages.iter().map(|p| p.import_path.as_str()).collect();
        assert_eq!(paths, vec!["example.com/demo", "example.com/demo/internal/models"]);

        let models = &packages[1];
        assert_eq!(models.name, "models");
        assert_eq!(models.id, "example.com/demo/internal/models");
        assert_eq!(models.files.len(), 1, "test files are skipped by default");
        assert_eq!(models.files[0].path, "internal/models/user.go");
    }

    #[test]
    fn test_include_tests() {
        let temp = module_fixture();
        let config = ScanConfig {
            include_tests: true,
            ..ScanConfig::default()
        };
        let packages = load_roots(&[pattern(temp.path(), "/internal/models")], &config).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].files.len(), 2);
    }

    #[test]
    fn test_non_recursive_root() {
        let temp = module_fixture();
        let packages = load_roots(&[pattern(temp.path(), "")], &ScanConfig::default()).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "main");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = pattern(temp.path(), "/nope/...");
        let err = load_roots(&[missing], &ScanConfig::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_exclude_patterns_skip_dirs() {
        let temp = module_fixture();
        let config = ScanConfig {
            exclude: vec!["internal/**".to_string()],
            ..ScanConfig::default()
        };
        let packages = load_roots(&[pattern(temp.path(), "/...")], &config).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].import_path, "example.com/demo");
    }

    #[test]
    fn test_without_go_mod_uses_root_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "proj/a/a.go", "package a\n");
        let root = temp.path().join("proj");
        let packages =
            load_roots(&[format!("{}/...", root.display())], &ScanConfig::default()).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].import_path, "proj/a");
    }

    #[test]
    fn test_overlapping_patterns_load_once() {
        let temp = module_fixture();
        let patterns = vec![pattern(temp.path(), "/..."), pattern(temp.path(), "")];
        let packages = load_roots(&patterns, &ScanConfig::default()).unwrap();
        assert_eq!(packages.len(), 2);
    }

    #[test]
    fn test_module_path() {
        assert_eq!(
            module_path("// comment\nmodule example.com/x // trailing\n"),
            Some("example.com/x".to_string())
        );
        assert_eq!(module_path("module \"quoted/mod\"\n"), Some("quoted/mod".to_string()));
        assert_eq!(module_path("modules x\n"), None);
        assert_eq!(module_path("go 1.21\n"), None);
    }

    #[test]
    fn test_split_pattern() {
        assert_eq!(split_pattern("./..."), (PathBuf::from("."), true));
        assert_eq!(split_pattern("..."), (PathBuf::from("."), true));
        assert_eq!(split_pattern("a/b/..."), (PathBuf::from("a/b"), true));
        assert_eq!(split_pattern("a/b"), (PathBuf::from("a/b"), false));
    }
}
