// PyO3 Bindings Module
//
// Python surface over the scanner, the single-file extractor and the import
// aliaser. Models cross the boundary as JSON strings.

mod aliaser;
mod api;

// Re-export for lib.rs
pub use aliaser::PyImportAliaser;
pub use api::{extract_source, scan_packages};
