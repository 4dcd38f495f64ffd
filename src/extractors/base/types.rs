// Declaration Model Types
//
// The in-memory value tree produced by extraction. Ownership is strictly
// tree-shaped: RootModel -> PackageModel -> StructModel/InterfaceModel/FuncModel.
// Back-references (a field's struct name, a param's function name) are plain
// lookup keys, never owning pointers.

use serde::{Deserialize, Serialize};

/// Top-level scan result for one loaded package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RootModel {
    /// Loader-assigned package identifier
    pub id: String,
    /// Package short name (the `package` clause)
    pub name: String,
    /// Root import path of the package
    pub pkg_path: String,
    /// One entry per source file that produced at least one struct
    pub packages: Vec<PackageModel>,
}

impl RootModel {
    /// Serialize the whole tree as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Every struct across all files, in file order
    pub fn structs(&self) -> impl Iterator<Item = &StructModel> {
        self.packages.iter().flat_map(|p| p.structs.iter())
    }
}

/// Declarations extracted from a single source file of a package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PackageModel {
    /// Import path of the owning package
    pub pkg: String,
    /// Short display alias (package name)
    pub alias: String,
    /// Source file the declarations came from (relative, Unix-style)
    pub file_path: String,
    pub structs: Vec<StructModel>,
    pub interfaces: Vec<InterfaceModel>,
    pub funcs: Vec<FuncModel>,
    /// Per-item conditions that did not abort the file
    pub diagnostics: Vec<Diagnostic>,
}

impl PackageModel {
    pub fn new(pkg: impl Into<String>, alias: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            pkg: pkg.into(),
            alias: alias.into(),
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// Find the first struct with the given name
    pub fn find_struct(&self, name: &str) -> Option<&StructModel> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// Location of a declaration in its source file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SourcePosition {
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
    /// Byte offset in the file
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructModel {
    pub pkg: String,
    pub alias: String,
    pub name: String,
    /// Position of the `struct` keyword
    pub position: SourcePosition,
    /// Doc-comment lines exactly as written, leader included
    pub comments: Vec<String>,
    pub fields: Vec<FieldModel>,
    pub methods: Vec<MethodModel>,
    pub annotations: Vec<Annotation>,
}

impl StructModel {
    pub fn find_method(&self, name: &str) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldModel {
    /// Name of the struct declaring this field (lookup key)
    pub struct_name: String,
    pub name: String,
    /// Canonical type text; empty when the shape is unsupported
    pub type_name: String,
    pub pointer: bool,
    pub tags: Vec<TagModel>,
}

/// One decoded struct tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagModel {
    /// Tag payload without its delimiters
    pub raw: String,
    /// `key:"value"` pairs in source order; keys may repeat
    pub entries: Vec<TagEntry>,
}

impl TagModel {
    /// First value bound to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceModel {
    pub pkg: String,
    pub name: String,
    pub position: SourcePosition,
    pub comments: Vec<String>,
    /// Method signatures declared in the interface body
    pub methods: Vec<MethodModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodModel {
    pub pkg: String,
    /// Receiver base type (or declaring interface) name
    pub owner: String,
    pub name: String,
    pub comments: Vec<String>,
    pub params: Vec<ParamModel>,
    pub returns: Vec<ReturnModel>,
}

/// A function declared without a receiver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuncModel {
    pub pkg: String,
    pub name: String,
    pub position: SourcePosition,
    pub comments: Vec<String>,
    pub params: Vec<ParamModel>,
    pub returns: Vec<ReturnModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamModel {
    pub func_name: String,
    pub name: String,
    pub type_name: String,
    pub pointer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnModel {
    pub func_name: String,
    /// Absent for unnamed results
    pub name: Option<String>,
    pub type_name: String,
    pub pointer: bool,
}

/// A `@Name(value)` directive found in a struct's doc comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Annotation {
    pub pkg: String,
    /// Name of the annotated struct (lookup key)
    pub struct_name: String,
    pub name: String,
    /// Text between the outermost parentheses, verbatim
    pub value: Option<String>,
    /// The comment line the annotation was read from
    pub raw: String,
}

/// A per-item extraction condition surfaced instead of aborting the file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    /// Struct, function or method the item belongs to
    pub owner: String,
    /// Field, parameter or result name
    pub item: String,
    pub position: SourcePosition,
    pub error: String,
}
