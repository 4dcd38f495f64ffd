//! ExtractorManager - Public API for declaration extraction
//!
//! Parses source text when needed and delegates to the Go extractor. Each call
//! builds its own extractor, so one manager can be shared across threads.

use crate::extractors::base::{PackageModel, PackageRef};
use crate::extractors::go::GoExtractor;
use crate::language::{parse_go_source, SourceFile};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractorManager {}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Extract the declaration model of one already-parsed file
    pub fn extract_file(&self, file: &SourceFile, package: &PackageRef) -> PackageModel {
        let mut extractor =
            GoExtractor::new(file.path.clone(), file.content.clone(), package.clone());
        let model = extractor.extract(&file.tree);

        tracing::debug!(
            "Extracted {} structs ({} diagnostics) from {}",
            model.structs.len(),
            model.diagnostics.len(),
            file.path
        );
        model
    }

    /// Parse and extract raw Go source text
    pub fn extract_source(
        &self,
        file_path: &str,
        content: &str,
        package: &PackageRef,
    ) -> Result<PackageModel, anyhow::Error> {
        let file = parse_go_source(file_path, content.to_string())?;
        Ok(self.extract_file(&file, package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_source() {
        let code = "package demo\n\n// Thing is a thing.\n// @Component\ntype Thing struct {\n\tID int `json:\"id\"`\n}\n";
        let manager = ExtractorManager::new();
        let model = manager
            .extract_source("demo/thing.go", code, &PackageRef::new("example.com/demo", "demo"))
            .unwrap();

        assert_eq!(model.pkg, "example.com/demo");
        assert_eq!(model.alias, "demo");
        assert_eq!(model.file_path, "demo/thing.go");
        assert_eq!(model.structs.len(), 1);
        let thing = &model.structs[0];
        assert_eq!(thing.position.line, 5);
        assert_eq!(thing.fields[0].tags[0].get("json"), Some("id"));
        assert_eq!(thing.annotations[0].name, "Component");
    }
}
