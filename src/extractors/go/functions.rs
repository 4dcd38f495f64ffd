use std::collections::HashMap;
use tracing::debug;
use tree_sitter::Node;

use crate::extractors::base::{FuncModel, MethodModel, PackageModel, ParamModel, ReturnModel};

/// Function and method extraction for Go
impl super::GoExtractor {
    /// Attach a method to every struct whose name matches its receiver
    pub(super) fn extract_method(
        &mut self,
        node: Node,
        index: &HashMap<String, Vec<usize>>,
        model: &mut PackageModel,
    ) {
        let Some(receiver) = node.child_by_field_name("receiver") else {
            return;
        };
        let Some(owner) = self.receiver_base_name(receiver) else {
            debug!(
                "{}: receiver `{}` is not a local type, skipping",
                self.base.file_path,
                self.get_node_text(receiver)
            );
            return;
        };
        let Some(targets) = index.get(&owner) else {
            return;
        };

        let name = self.declared_name(node);
        let comments = self.doc_comments(node);
        let (params, returns) = self.extract_signature(node, &owner, &name);

        let method = MethodModel {
            pkg: self.base.package.import_path.clone(),
            owner,
            name,
            comments,
            params,
            returns,
        };

        for &idx in targets {
            if let Some(strukt) = model.structs.get_mut(idx) {
                strukt.methods.push(method.clone());
            }
        }
    }

    pub(super) fn extract_function(&mut self, node: Node) -> FuncModel {
        let name = self.declared_name(node);
        let comments = self.doc_comments(node);
        let (params, returns) = self.extract_signature(node, &name, &name);

        FuncModel {
            pkg: self.base.package.import_path.clone(),
            name,
            position: self.base.position(&node),
            comments,
            params,
            returns,
        }
    }

    /// A method element of an interface body; its owner is the interface
    pub(super) fn extract_interface_method(&mut self, interface: &str, node: Node) -> Option<MethodModel> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.get_node_text(n))?;
        let comments = self.doc_comments(node);
        let (params, returns) = self.extract_signature(node, interface, &name);

        Some(MethodModel {
            pkg: self.base.package.import_path.clone(),
            owner: interface.to_string(),
            name,
            comments,
            params,
            returns,
        })
    }

    fn declared_name(&self, node: Node) -> String {
        node.child_by_field_name("name")
            .map(|n| self.get_node_text(n))
            .unwrap_or_default()
    }

    /// Parameters and results of anything with `parameters` / `result` fields.
    ///
    /// `owner` is used only to label diagnostics.
    fn extract_signature(
        &mut self,
        node: Node,
        owner: &str,
        func_name: &str,
    ) -> (Vec<ParamModel>, Vec<ReturnModel>) {
        let label = if owner == func_name {
            func_name.to_string()
        } else {
            format!("{}.{}", owner, func_name)
        };

        let params = match node.child_by_field_name("parameters") {
            Some(list) => self.extract_params(list, &label, func_name),
            None => Vec::new(),
        };

        let returns = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => {
                self.extract_results(result, &label, func_name)
            }
            Some(result) => {
                let resolved = self.resolve_type(result, &label, "#0");
                vec![ReturnModel {
                    func_name: func_name.to_string(),
                    name: None,
                    type_name: resolved.type_name,
                    pointer: resolved.pointer,
                }]
            }
            None => Vec::new(),
        };

        (params, returns)
    }

    /// Every declared name gets its own entry: `a, b int` yields two params
    /// sharing one resolved type. An unnamed parameter yields one entry with an
    /// empty name.
    fn extract_params(&mut self, list: Node, label: &str, func_name: &str) -> Vec<ParamModel> {
        let mut params = Vec::new();

        for (position, declaration) in parameter_declarations(list).into_iter().enumerate() {
            let names = self.declared_names(declaration);
            let item = names
                .first()
                .cloned()
                .unwrap_or_else(|| format!("#{}", position));

            let Some(type_node) = declaration.child_by_field_name("type") else {
                continue;
            };
            let resolved = if declaration.kind() == "variadic_parameter_declaration" {
                let shape = super::TypeShape::Unsupported {
                    kind: "variadic".to_string(),
                    text: format!("...{}", self.get_node_text(type_node)),
                };
                self.resolve_shape(shape, declaration, label, &item)
            } else {
                self.resolve_type(type_node, label, &item)
            };

            let names = if names.is_empty() {
                vec![String::new()]
            } else {
                names
            };

            for name in names {
                params.push(ParamModel {
                    func_name: func_name.to_string(),
                    name,
                    type_name: resolved.type_name.clone(),
                    pointer: resolved.pointer,
                });
            }
        }

        params
    }

    /// Results in declared order; named groups expand like parameters
    fn extract_results(&mut self, list: Node, label: &str, func_name: &str) -> Vec<ReturnModel> {
        let mut returns = Vec::new();

        for declaration in parameter_declarations(list) {
            let Some(type_node) = declaration.child_by_field_name("type") else {
                continue;
            };
            let names = self.declared_names(declaration);
            let item = names
                .first()
                .cloned()
                .unwrap_or_else(|| format!("#{}", returns.len()));
            let resolved = self.resolve_type(type_node, label, &item);

            if names.is_empty() {
                returns.push(ReturnModel {
                    func_name: func_name.to_string(),
                    name: None,
                    type_name: resolved.type_name,
                    pointer: resolved.pointer,
                });
                continue;
            }

            for name in names {
                returns.push(ReturnModel {
                    func_name: func_name.to_string(),
                    name: Some(name),
                    type_name: resolved.type_name.clone(),
                    pointer: resolved.pointer,
                });
            }
        }

        returns
    }

    fn declared_names(&self, declaration: Node) -> Vec<String> {
        let mut cursor = declaration.walk();
        let names: Vec<String> = declaration
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.get_node_text(n))
            .collect();
        names
    }
}

fn parameter_declarations(list: Node) -> Vec<Node> {
    let mut cursor = list.walk();
    let declarations: Vec<Node> = list
        .named_children(&mut cursor)
        .filter(|c| {
            matches!(
                c.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            )
        })
        .collect();
    declarations
}
