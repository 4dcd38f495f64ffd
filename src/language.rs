//! Language Support - tree-sitter configuration for Go sources
//!
//! All tree-sitter grammar setup lives here so the loader, the extractor manager
//! and tests build parsers the same way.

use anyhow::{Context, Result};
use tree_sitter::{Parser, Tree};

/// File extension of sources the loader picks up
pub const GO_EXTENSION: &str = "go";

/// Get the tree-sitter grammar for Go
pub fn go_language() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// A parsed Go source file: the "already-parsed syntax file" the extractor consumes
pub struct SourceFile {
    /// Path relative to the scan root, Unix-style
    pub path: String,
    pub content: String,
    pub tree: Tree,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// Parse Go source text into a `SourceFile`
pub fn parse_go_source(path: &str, content: String) -> Result<SourceFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&go_language())
        .map_err(|e| anyhow::anyhow!("Failed to set parser language for go: {}", e))?;

    let tree = parser
        .parse(&content, None)
        .with_context(|| format!("Failed to parse file: {}", path))?;

    if tree.root_node().has_error() {
        tracing::warn!("Syntax errors while parsing {}", path);
    }

    Ok(SourceFile {
        path: path.to_string(),
        content,
        tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_source() {
        let file = parse_go_source("a/b.go", "package b\n\ntype T struct{}\n".to_string()).unwrap();
        assert_eq!(file.path, "a/b.go");
        assert_eq!(file.tree.root_node().kind(), "source_file");
        assert!(!file.tree.root_node().has_error());
    }

    #[test]
    fn test_parse_keeps_broken_source() {
        let file = parse_go_source("bad.go", "package b\n\ntype T struct {\n".to_string()).unwrap();
        assert!(file.tree.root_node().has_error());
    }
}
