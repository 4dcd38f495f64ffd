// Gostruct Core - tree-sitter extraction of Go declaration metadata
//
// Loads Go packages, extracts documented structs with their fields, tags,
// methods and `@Name(value)` annotations, and exposes the model to Rust and
// (with the `python` feature) to Python.

pub mod config;
pub mod extractors;
pub mod imports;
pub mod language;
pub mod loader;
pub mod scanner;
pub mod utils;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use config::ScanConfig;
pub use extractors::{
    Annotation, Diagnostic, ExtractError, ExtractorManager, FieldModel, FuncModel,
    InterfaceModel, MethodModel, PackageModel, PackageRef, ParamModel, ReturnModel, RootModel,
    SourcePosition, StructModel, TagEntry, TagModel,
};
pub use imports::ImportAliaser;
pub use loader::{load_roots, LoadedPackage};
pub use scanner::{scan_packages, Scanner};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Gostruct Core Python module
#[cfg(feature = "python")]
#[pymodule]
fn gostruct_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(bindings::scan_packages, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_source, m)?)?;

    m.add_class::<bindings::PyImportAliaser>()?;

    Ok(())
}
