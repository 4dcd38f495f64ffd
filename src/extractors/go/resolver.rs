use std::fmt;
use std::str::FromStr;

use tree_sitter::Node;

use crate::extractors::base::ExtractError;

/// Classification of a Go type expression.
///
/// Only named types, optionally package-qualified and optionally behind a single
/// pointer, are resolvable. Every other shape lands in `Unsupported` with the
/// grammar kind and source text so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// `int`
    Ident { name: String },
    /// `*int`
    PointerIdent { name: String },
    /// `time.Time`
    Qualified { package: String, name: String },
    /// `*time.Time`
    PointerQualified { package: String, name: String },
    Unsupported { kind: String, text: String },
}

/// A resolved type: canonical text plus pointer flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_name: String,
    pub pointer: bool,
}

impl TypeShape {
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            TypeShape::PointerIdent { .. } | TypeShape::PointerQualified { .. }
        )
    }

    /// Unqualified type name, without package or pointer
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeShape::Ident { name }
            | TypeShape::PointerIdent { name }
            | TypeShape::Qualified { name, .. }
            | TypeShape::PointerQualified { name, .. } => Some(name),
            TypeShape::Unsupported { .. } => None,
        }
    }

    /// The same type behind one more pointer.
    ///
    /// Only a bare or qualified name stays resolvable; anything else becomes
    /// unsupported.
    pub fn into_pointer(self) -> TypeShape {
        match self {
            TypeShape::Ident { name } => TypeShape::PointerIdent { name },
            TypeShape::Qualified { package, name } => {
                TypeShape::PointerQualified { package, name }
            }
            TypeShape::Unsupported { kind, text } => TypeShape::Unsupported {
                kind,
                text: format!("*{}", text),
            },
            shape => TypeShape::Unsupported {
                kind: "pointer_type".to_string(),
                text: format!("*{}", shape),
            },
        }
    }

    /// Canonical text form, `None` for unsupported shapes
    pub fn canonical(&self) -> Option<String> {
        match self {
            TypeShape::Ident { name } => Some(name.clone()),
            TypeShape::PointerIdent { name } => Some(format!("*{}", name)),
            TypeShape::Qualified { package, name } => Some(format!("{}.{}", package, name)),
            TypeShape::PointerQualified { package, name } => {
                Some(format!("*{}.{}", package, name))
            }
            TypeShape::Unsupported { .. } => None,
        }
    }

    pub fn resolve(self) -> Result<ResolvedType, ExtractError> {
        let pointer = self.is_pointer();
        match self {
            TypeShape::Unsupported { kind, text } => {
                Err(ExtractError::UnsupportedType { kind, text })
            }
            shape => Ok(ResolvedType {
                type_name: shape.canonical().unwrap_or_default(),
                pointer,
            }),
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Unsupported { text, .. } => write!(f, "{}", text),
            shape => write!(f, "{}", shape.canonical().unwrap_or_default()),
        }
    }
}

impl FromStr for TypeShape {
    type Err = ExtractError;

    /// Parse a canonical type string back into its shape
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || ExtractError::UnsupportedType {
            kind: "text".to_string(),
            text: s.to_string(),
        };

        let (pointer, rest) = match s.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let shape = match rest.split_once('.') {
            Some((package, name)) if is_identifier(package) && is_identifier(name) => {
                let (package, name) = (package.to_string(), name.to_string());
                if pointer {
                    TypeShape::PointerQualified { package, name }
                } else {
                    TypeShape::Qualified { package, name }
                }
            }
            None if is_identifier(rest) => {
                let name = rest.to_string();
                if pointer {
                    TypeShape::PointerIdent { name }
                } else {
                    TypeShape::Ident { name }
                }
            }
            _ => return Err(unsupported()),
        };

        Ok(shape)
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Classify a type node from a Go syntax tree
pub fn classify(node: Node, source: &[u8]) -> TypeShape {
    let text = |n: Node| n.utf8_text(source).unwrap_or_default().to_string();

    match node.kind() {
        "type_identifier" => TypeShape::Ident { name: text(node) },
        "qualified_type" => match qualified_parts(node, source) {
            Some((package, name)) => TypeShape::Qualified { package, name },
            None => unsupported(node, source),
        },
        "pointer_type" => match node.named_child(0) {
            Some(inner) if inner.kind() == "type_identifier" => {
                TypeShape::PointerIdent { name: text(inner) }
            }
            Some(inner) if inner.kind() == "qualified_type" => {
                match qualified_parts(inner, source) {
                    Some((package, name)) => TypeShape::PointerQualified { package, name },
                    None => unsupported(node, source),
                }
            }
            _ => unsupported(node, source),
        },
        _ => unsupported(node, source),
    }
}

fn qualified_parts(node: Node, source: &[u8]) -> Option<(String, String)> {
    let package = node.child_by_field_name("package")?.utf8_text(source).ok()?;
    let name = node.child_by_field_name("name")?.utf8_text(source).ok()?;
    Some((package.to_string(), name.to_string()))
}

fn unsupported(node: Node, source: &[u8]) -> TypeShape {
    TypeShape::Unsupported {
        kind: node.kind().to_string(),
        text: node.utf8_text(source).unwrap_or_default().to_string(),
    }
}
