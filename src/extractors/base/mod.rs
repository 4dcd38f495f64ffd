// Base Extractor Types
//
// - types.rs: the declaration model (RootModel down to Annotation)
// - errors.rs: recoverable per-item extraction errors
// - extractor.rs: BaseExtractor, the per-file context shared by language extractors

pub mod errors;
pub mod extractor;
pub mod types;

pub use errors::ExtractError;
pub use extractor::{contains_comment, BaseExtractor, PackageRef};
pub use types::{
    Annotation, Diagnostic, FieldModel, FuncModel, InterfaceModel, MethodModel, PackageModel,
    ParamModel, ReturnModel, RootModel, SourcePosition, StructModel, TagEntry, TagModel,
};
