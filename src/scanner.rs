// Scanner - loads root packages and aggregates their declaration models
//
// One RootModel per loaded package. Packages share no mutable state, so they
// are extracted on the rayon pool when enabled; `collect` keeps input order.

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::extractors::base::RootModel;
use crate::extractors::ExtractorManager;
use crate::loader::{load_roots, LoadedPackage};

/// A configured scan over a set of root patterns
#[derive(Debug, Clone)]
pub struct Scanner {
    paths: Vec<String>,
    config: ScanConfig,
    manager: ExtractorManager,
}

impl Scanner {
    pub fn new(paths: Vec<String>, config: ScanConfig) -> Self {
        Self {
            paths,
            config,
            manager: ExtractorManager::new(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Load every root and extract one model per package.
    ///
    /// Fails only when a root cannot be loaded; per-declaration problems are
    /// reported through `PackageModel::diagnostics`.
    pub fn scan(&self) -> Result<Vec<RootModel>> {
        let packages = load_roots(&self.paths, &self.config)?;

        let roots: Vec<RootModel> = if self.config.parallel {
            packages
                .par_iter()
                .map(|package| self.parse_package(package))
                .collect()
        } else {
            packages
                .iter()
                .map(|package| self.parse_package(package))
                .collect()
        };

        info!(
            "Scanned {} packages ({} structs)",
            roots.len(),
            roots.iter().map(|r| r.structs().count()).sum::<usize>()
        );
        Ok(roots)
    }

    /// Extract every file of one package; files without structs are dropped
    pub fn parse_package(&self, package: &LoadedPackage) -> RootModel {
        let package_ref = package.package_ref();
        let packages = package
            .files
            .iter()
            .map(|file| self.manager.extract_file(file, &package_ref))
            .filter(|model| !model.structs.is_empty())
            .collect::<Vec<_>>();

        debug!(
            "Package {}: {} of {} files carry structs",
            package.import_path,
            packages.len(),
            package.files.len()
        );

        RootModel {
            id: package.id.clone(),
            name: package.name.clone(),
            pkg_path: package.import_path.clone(),
            packages,
        }
    }
}

/// Scan `paths` with the default configuration
pub fn scan_packages(paths: &[String]) -> Result<Vec<RootModel>> {
    Scanner::new(paths.to_vec(), ScanConfig::default()).scan()
}
