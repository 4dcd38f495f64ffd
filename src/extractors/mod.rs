//! Declaration Extractors
//!
//! Tree-sitter based extraction of the declaration model from parsed sources.
//!
//! # Architecture
//!
//! - `base` - model types, per-item errors and the shared per-file context
//! - `manager` - ExtractorManager public API
//! - `go` - the Go extractor with its type resolver, tag decoder and
//!   annotation decoder

pub mod base;
pub mod go;
pub mod manager;

pub use base::{
    Annotation, Diagnostic, ExtractError, FieldModel, FuncModel, InterfaceModel, MethodModel,
    PackageModel, PackageRef, ParamModel, ReturnModel, RootModel, SourcePosition, StructModel,
    TagEntry, TagModel,
};
pub use manager::ExtractorManager;
