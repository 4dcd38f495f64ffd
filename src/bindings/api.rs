// API Functions - PyO3-exposed functions for Python
//
// Both functions return the declaration model serialized as JSON so Python
// callers can load it with `json.loads`.

use crate::config::ScanConfig;
use crate::extractors::{ExtractorManager, PackageRef};
use crate::scanner::Scanner;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Scan Go packages below the given root patterns
///
/// Args:
///     paths (list[str]): Root directories; a trailing `/...` includes sub-directories
///     config (str | None): Optional JSON scan configuration
///
/// Returns:
///     str: JSON array with one root model per package
///
/// Raises:
///     ValueError: If a root cannot be loaded or the configuration is invalid
#[pyfunction]
#[pyo3(signature = (paths, config = None))]
pub fn scan_packages(py: Python<'_>, paths: Vec<String>, config: Option<&str>) -> PyResult<String> {
    let config = match config {
        Some(json) => ScanConfig::from_json_str(json)
            .map_err(|e| PyValueError::new_err(format!("{:#}", e)))?,
        None => ScanConfig::default(),
    };

    // Release GIL for the parallel scan
    let roots = py
        .detach(move || Scanner::new(paths, config).scan())
        .map_err(|e| PyValueError::new_err(format!("Scan failed: {:#}", e)))?;

    serde_json::to_string(&roots)
        .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
}

/// Extract the declaration model of one Go source file
///
/// Args:
///     content (str): Go source text
///     file_path (str): Path recorded in the model
///     import_path (str): Import path of the owning package
///     package_name (str): Short package name
///
/// Returns:
///     str: JSON object for the file's package model
#[pyfunction]
#[pyo3(signature = (content, file_path, import_path, package_name))]
pub fn extract_source(
    content: &str,
    file_path: &str,
    import_path: &str,
    package_name: &str,
) -> PyResult<String> {
    let manager = ExtractorManager::new();
    let package = PackageRef::new(import_path, package_name);

    let model = manager
        .extract_source(file_path, content, &package)
        .map_err(|e| PyValueError::new_err(format!("Extraction failed: {}", e)))?;

    serde_json::to_string(&model)
        .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
}
