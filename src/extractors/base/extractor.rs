// BaseExtractor - per-file extraction context
//
// Holds the source text and package identity for the file being walked and
// collects per-item diagnostics while the language extractor builds the model.

use tracing::debug;
use tree_sitter::Node;

use super::errors::ExtractError;
use super::types::{Diagnostic, SourcePosition};

/// Identity of the package a file belongs to, as supplied by the loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Full import path
    pub import_path: String,
    /// Short package name
    pub name: String,
}

impl PackageRef {
    pub fn new(import_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            name: name.into(),
        }
    }
}

/// Shared state and node helpers for one file's extraction pass
pub struct BaseExtractor {
    pub file_path: String,
    pub content: String,
    pub package: PackageRef,
    pub diagnostics: Vec<Diagnostic>,
}

impl BaseExtractor {
    pub fn new(file_path: String, content: String, package: PackageRef) -> Self {
        debug!(
            "BaseExtractor for '{}' in package '{}'",
            file_path, package.import_path
        );

        Self {
            file_path,
            content,
            package,
            diagnostics: Vec::new(),
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    pub fn position(&self, node: &Node) -> SourcePosition {
        let start = node.start_position();
        SourcePosition {
            line: (start.row + 1) as u32,
            column: start.column as u32,
            offset: node.start_byte() as u32,
        }
    }

    /// Collect the doc-comment block attached to a declaration node.
    ///
    /// A doc comment is the run of comment siblings directly above the node with
    /// no blank line in between. A comment trailing code on its own line ends
    /// the run. Lines are returned top to bottom, leader included.
    pub fn find_doc_comments(&self, node: &Node) -> Vec<String> {
        let mut comments = Vec::new();
        let mut next_row = node.start_position().row;
        let mut current = node.prev_named_sibling();

        while let Some(sibling) = current {
            if sibling.kind() != "comment" || sibling.end_position().row + 1 != next_row {
                break;
            }

            if let Some(before) = sibling.prev_named_sibling() {
                if before.kind() != "comment"
                    && before.end_position().row == sibling.start_position().row
                {
                    break;
                }
            }

            comments.push(self.get_node_text(&sibling));
            next_row = sibling.start_position().row;
            current = sibling.prev_named_sibling();
        }

        comments.reverse();
        comments
    }

    /// Record a recoverable per-item failure
    pub fn push_diagnostic(&mut self, owner: &str, item: &str, node: &Node, error: ExtractError) {
        debug!(
            "{}: {}.{} skipped: {}",
            self.file_path, owner, item, error
        );
        let position = self.position(node);
        self.diagnostics.push(Diagnostic {
            owner: owner.to_string(),
            item: item.to_string(),
            position,
            error: error.to_string(),
        });
    }
}

/// Whether any comment appears anywhere under `node`
pub fn contains_comment(node: Node) -> bool {
    if node.kind() == "comment" {
        return true;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(contains_comment);
    found
}
