use std::collections::HashMap;
use tree_sitter::Node;

use super::resolver::{classify, ResolvedType, TypeShape};
use crate::extractors::base::StructModel;

/// Struct name -> positions in the struct list, duplicates included
pub(super) fn struct_index(structs: &[StructModel]) -> HashMap<String, Vec<usize>> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, strukt) in structs.iter().enumerate() {
        index.entry(strukt.name.clone()).or_default().push(idx);
    }
    index
}

/// Helper methods for node text, type resolution and receivers
impl super::GoExtractor {
    pub(super) fn get_node_text(&self, node: Node) -> String {
        self.base.get_node_text(&node)
    }

    pub(super) fn classify_type(&self, node: Node) -> TypeShape {
        classify(node, self.base.content.as_bytes())
    }

    /// Resolve a type node, recording a diagnostic when its shape is unsupported.
    /// Unsupported types resolve to an empty type string.
    pub(super) fn resolve_type(&mut self, node: Node, owner: &str, item: &str) -> ResolvedType {
        let shape = self.classify_type(node);
        self.resolve_shape(shape, node, owner, item)
    }

    pub(super) fn resolve_shape(
        &mut self,
        shape: TypeShape,
        node: Node,
        owner: &str,
        item: &str,
    ) -> ResolvedType {
        match shape.resolve() {
            Ok(resolved) => resolved,
            Err(err) => {
                self.base.push_diagnostic(owner, item, &node, err);
                ResolvedType {
                    type_name: String::new(),
                    pointer: false,
                }
            }
        }
    }

    /// Base type name of a method receiver.
    ///
    /// Only `T` and `*T` receivers name a local struct; qualified or generic
    /// receivers yield `None` and the method is not attached anywhere.
    pub(super) fn receiver_base_name(&self, receiver_list: Node) -> Option<String> {
        let mut cursor = receiver_list.walk();
        let param = receiver_list
            .named_children(&mut cursor)
            .find(|c| c.kind() == "parameter_declaration")?;
        let type_node = param.child_by_field_name("type")?;

        match self.classify_type(type_node) {
            TypeShape::Ident { name } | TypeShape::PointerIdent { name } => Some(name),
            _ => None,
        }
    }

    pub(super) fn doc_comments(&self, node: Node) -> Vec<String> {
        self.base.find_doc_comments(&node)
    }
}
