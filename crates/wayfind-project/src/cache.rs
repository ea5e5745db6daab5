//! Lazily populated module and package cache over the filesystem.

use crate::package::ProjectPackage;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::trace;
use wayfind_core::paths::dirname;
use wayfind_core::{LookupError, Module, ModuleCache};

/// Module and package handles for one project, shared between clones.
///
/// Modules are handed out for any path; packages only for `package.json`
/// files that exist.
#[derive(Debug, Clone, Default)]
pub struct ProjectModuleCache {
    inner: Arc<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    modules: RwLock<HashMap<PathBuf, Arc<ModuleEntry>>>,
    packages: RwLock<HashMap<PathBuf, ProjectPackage>>,
}

#[derive(Debug)]
struct ModuleEntry {
    path: PathBuf,
    /// Closest `package.json` above the module, once looked up.
    package_json: OnceLock<Option<PathBuf>>,
}

/// A module handle.
#[derive(Clone)]
pub struct ProjectModule {
    entry: Arc<ModuleEntry>,
    cache: ProjectModuleCache,
}

impl ProjectModuleCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `path`; never fails.
    #[must_use]
    pub fn module(&self, path: &Path) -> ProjectModule {
        ProjectModule {
            entry: self.module_entry(path),
            cache: self.clone(),
        }
    }

    fn module_entry(&self, path: &Path) -> Arc<ModuleEntry> {
        if let Ok(modules) = self.inner.modules.read() {
            if let Some(entry) = modules.get(path) {
                return Arc::clone(entry);
            }
        }

        let entry = Arc::new(ModuleEntry {
            path: path.to_path_buf(),
            package_json: OnceLock::new(),
        });
        match self.inner.modules.write() {
            Ok(mut modules) => Arc::clone(modules.entry(path.to_path_buf()).or_insert(entry)),
            Err(_) => entry,
        }
    }

    /// Number of module handles created so far.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.inner.modules.read().map_or(0, |modules| modules.len())
    }
}

impl ModuleCache for ProjectModuleCache {
    type Package = ProjectPackage;
    type Module = ProjectModule;

    fn get_module(&self, path: &Path) -> Result<ProjectModule, LookupError> {
        Ok(self.module(path))
    }

    fn get_package(&self, path: &Path) -> Result<ProjectPackage, LookupError> {
        if let Ok(packages) = self.inner.packages.read() {
            if let Some(package) = packages.get(path) {
                return Ok(package.clone());
            }
        }

        if !path.is_file() {
            return Err(LookupError::PackageNotFound(path.to_path_buf()));
        }

        let package = ProjectPackage::new(path);
        if let Ok(mut packages) = self.inner.packages.write() {
            return Ok(packages
                .entry(path.to_path_buf())
                .or_insert(package)
                .clone());
        }
        Ok(package)
    }
}

impl Module for ProjectModule {
    type Package = ProjectPackage;

    fn path(&self) -> &Path {
        &self.entry.path
    }

    fn get_package(&self) -> Result<Option<ProjectPackage>, LookupError> {
        let package_json = self
            .entry
            .package_json
            .get_or_init(|| closest_package_json(&self.entry.path));

        match package_json {
            Some(path) => self.cache.get_package(path).map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for ProjectModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectModule")
            .field("path", &self.entry.path)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ProjectModule {
    fn eq(&self, other: &Self) -> bool {
        self.entry.path == other.entry.path
    }
}

fn closest_package_json(module_path: &Path) -> Option<PathBuf> {
    let found = dirname(module_path)
        .ancestors()
        .map(|dir| dir.join("package.json"))
        .find(|candidate| candidate.is_file());
    trace!(module = %module_path.display(), package = ?found, "closest package");
    found
}
