// PyImportAliaser - PyO3 wrapper for ImportAliaser
//
// Each Python instance owns its own aliaser; pyo3 serializes access through
// the `&mut self` borrow.

use crate::imports::ImportAliaser;
use pyo3::prelude::*;

/// Python-accessible import alias registry
#[pyclass(name = "ImportAliaser")]
#[derive(Default)]
pub struct PyImportAliaser {
    inner: ImportAliaser,
}

#[pymethods]
impl PyImportAliaser {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Return the alias bound to `import_path`, binding a fresh one if needed
    fn resolve(&mut self, import_path: &str) -> String {
        self.inner.resolve(import_path)
    }

    fn alias_for(&self, import_path: &str) -> Option<String> {
        self.inner.alias_for(import_path).map(str::to_string)
    }

    fn path_for(&self, alias: &str) -> Option<String> {
        self.inner.path_for(alias).map(str::to_string)
    }

    /// Go import lines for every bound path, sorted by path
    fn import_specs(&self) -> Vec<String> {
        self.inner.import_specs()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("ImportAliaser(len={})", self.inner.len())
    }
}
