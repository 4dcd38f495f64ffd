mod annotations;
mod declarations;
mod functions;
mod helpers;
pub mod resolver;
pub mod tags;

pub use annotations::decode_annotations;
pub use resolver::{classify, ResolvedType, TypeShape};
pub use tags::{decode_tag, tag_payload};

use crate::extractors::base::{contains_comment, BaseExtractor, PackageModel, PackageRef};
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

/// Go declaration extractor.
///
/// Walks the top-level declarations of one parsed file and builds its
/// `PackageModel`:
/// - documented structs with their fields and decoded tags
/// - methods attached to those structs by receiver name
/// - `@Name(value)` annotations from struct doc comments
/// - documented interfaces and free functions
pub struct GoExtractor {
    base: BaseExtractor,
}

impl GoExtractor {
    pub fn new(file_path: String, content: String, package: PackageRef) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content, package),
        }
    }

    /// Extract the declaration model for this file.
    ///
    /// A file with no comments at all yields an empty model. Structs are built
    /// first; methods, functions and annotations are resolved against them
    /// afterwards so attachment never depends on declaration order.
    pub fn extract(&mut self, tree: &Tree) -> PackageModel {
        let root = tree.root_node();
        let package = &self.base.package;
        let mut model = PackageModel::new(
            package.import_path.clone(),
            package.name.clone(),
            self.base.file_path.clone(),
        );

        if !contains_comment(root) {
            debug!("{}: no comments, skipping", self.base.file_path);
            return model;
        }

        if root.has_error() {
            warn!(
                "{}: syntax errors present, extracting recognised declarations only",
                self.base.file_path
            );
        }

        let declarations = top_level_declarations(root);

        for decl in declarations.iter().filter(|d| d.kind() == "type_declaration") {
            self.extract_type_declaration(*decl, &mut model);
        }

        let index = helpers::struct_index(&model.structs);
        for decl in &declarations {
            match decl.kind() {
                "method_declaration" => self.extract_method(*decl, &index, &mut model),
                "function_declaration" => {
                    let func = self.extract_function(*decl);
                    model.funcs.push(func);
                }
                _ => {}
            }
        }

        for strukt in &mut model.structs {
            strukt.annotations = decode_annotations(&strukt.pkg, &strukt.name, &strukt.comments);
        }

        model.diagnostics = std::mem::take(&mut self.base.diagnostics);

        debug!(
            "Extracted {} structs, {} interfaces, {} funcs from {}",
            model.structs.len(),
            model.interfaces.len(),
            model.funcs.len(),
            self.base.file_path
        );

        model
    }
}

fn top_level_declarations(root: Node) -> Vec<Node> {
    let mut cursor = root.walk();
    let declarations: Vec<Node> = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    declarations
}
