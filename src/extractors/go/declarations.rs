use tree_sitter::Node;

use super::tags::{decode_tag, tag_payload};
use crate::extractors::base::{FieldModel, InterfaceModel, PackageModel, StructModel};

/// Struct and interface extraction for Go type declarations
impl super::GoExtractor {
    /// Walk every type spec of a `type` declaration (single or grouped).
    ///
    /// The declaration's doc comment applies to all its type specs; inside a
    /// group, a type spec without one falls back to the comment directly above it.
    pub(super) fn extract_type_declaration(&mut self, decl: Node, model: &mut PackageModel) {
        let decl_comments = self.doc_comments(decl);

        let mut cursor = decl.walk();
        let type_specs: Vec<Node> = decl
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "type_spec")
            .collect();

        for type_spec in type_specs {
            let Some(type_node) = type_spec.child_by_field_name("type") else {
                continue;
            };
            if !matches!(type_node.kind(), "struct_type" | "interface_type") {
                continue;
            }

            let comments = if decl_comments.is_empty() {
                self.doc_comments(type_spec)
            } else {
                decl_comments.clone()
            };
            if comments.is_empty() {
                continue;
            }

            let Some(name) = type_spec.child_by_field_name("name").map(|n| self.get_node_text(n))
            else {
                continue;
            };

            if type_node.kind() == "struct_type" {
                let structure = self.extract_struct(name, type_node, comments);
                model.structs.push(structure);
            } else {
                let interface = self.extract_interface(name, type_node, comments);
                model.interfaces.push(interface);
            }
        }
    }

    fn extract_struct(&mut self, name: String, struct_node: Node, comments: Vec<String>) -> StructModel {
        let mut fields = Vec::new();

        let mut cursor = struct_node.walk();
        let field_lists: Vec<Node> = struct_node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "field_declaration_list")
            .collect();

        for list in field_lists {
            let mut list_cursor = list.walk();
            let declarations: Vec<Node> = list
                .named_children(&mut list_cursor)
                .filter(|c| c.kind() == "field_declaration")
                .collect();

            for declaration in declarations {
                if let Some(field) = self.extract_field(&name, declaration) {
                    fields.push(field);
                }
            }
        }

        let package = &self.base.package;
        StructModel {
            pkg: package.import_path.clone(),
            alias: package.name.clone(),
            name,
            position: self.base.position(&struct_node),
            comments,
            fields,
            methods: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// One field per declaration, named by its first identifier.
    ///
    /// `A, B int` yields only `A`. An embedded field takes the name of its type.
    fn extract_field(&mut self, struct_name: &str, node: Node) -> Option<FieldModel> {
        let type_node = node.child_by_field_name("type")?;

        let first_name = node
            .child_by_field_name("name")
            .map(|n| self.get_node_text(n));

        let mut shape = self.classify_type(type_node);
        let name = match first_name {
            Some(name) => name,
            None => {
                // Embedded: `T`, `*T`, `pkg.T`, `*pkg.T`
                let mut cursor = node.walk();
                let embedded_pointer = node.children(&mut cursor).any(|c| c.kind() == "*");
                if embedded_pointer {
                    shape = shape.into_pointer();
                }
                shape
                    .base_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.get_node_text(type_node))
            }
        };

        let resolved = self.resolve_shape(shape, type_node, struct_name, &name);

        let mut tags = Vec::new();
        if let Some(tag_node) = node.child_by_field_name("tag") {
            let literal = self.get_node_text(tag_node);
            match tag_payload(&literal).and_then(|payload| decode_tag(&payload)) {
                Ok(tag) => tags.push(tag),
                Err(err) => self.base.push_diagnostic(struct_name, &name, &tag_node, err),
            }
        }

        Some(FieldModel {
            struct_name: struct_name.to_string(),
            name,
            type_name: resolved.type_name,
            pointer: resolved.pointer,
            tags,
        })
    }

    fn extract_interface(
        &mut self,
        name: String,
        interface_node: Node,
        comments: Vec<String>,
    ) -> InterfaceModel {
        let mut cursor = interface_node.walk();
        let elements: Vec<Node> = interface_node
            .named_children(&mut cursor)
            .filter(|c| matches!(c.kind(), "method_elem" | "method_spec"))
            .collect();

        let methods = elements
            .into_iter()
            .filter_map(|element| self.extract_interface_method(&name, element))
            .collect();

        InterfaceModel {
            pkg: self.base.package.import_path.clone(),
            name,
            position: self.base.position(&interface_node),
            comments,
            methods,
        }
    }
}
