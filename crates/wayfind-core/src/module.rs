//! Capability traits for the module/package object model.
//!
//! A module is identified by its absolute file path. Any backing store
//! (an in-memory graph, a lazily populated filesystem cache) can stand
//! behind these traits; the core never mutates a handle.

use crate::error::LookupError;
use std::path::{Path, PathBuf};

/// Target of a package redirect (browser map) entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Substitute this specifier.
    Path(String),
    /// The entry is `false`: use the empty module.
    Empty,
}

impl Redirect {
    /// The redirected specifier, or `None` for [`Redirect::Empty`].
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Empty => None,
        }
    }
}

/// A module handle.
pub trait Module: Clone {
    type Package: Package;

    /// Absolute file path of the module.
    fn path(&self) -> &Path;

    /// The package owning this module, if any.
    fn get_package(&self) -> Result<Option<Self::Package>, LookupError>;
}

/// A package handle.
pub trait Package {
    /// Path of the package metadata file (`package.json`).
    fn path(&self) -> &Path;

    /// Query the package's redirect map.
    ///
    /// Relative names are package-relative (`./lib/foo`). `Ok(None)` means
    /// the map has no entry for `name`.
    fn redirect_require(
        &self,
        name: &str,
        main_fields: &[String],
    ) -> Result<Option<Redirect>, LookupError>;

    /// Absolute path prefix of the package entry point for the given
    /// prioritized main fields.
    fn get_main(&self, main_fields: &[String]) -> Result<PathBuf, LookupError>;
}

/// Module/package cache.
pub trait ModuleCache {
    type Package: Package;
    type Module: Module<Package = Self::Package>;

    fn get_module(&self, path: &Path) -> Result<Self::Module, LookupError>;

    /// Package handle for a `package.json` path.
    fn get_package(&self, path: &Path) -> Result<Self::Package, LookupError>;
}

/// Precomputed name index (the "fast module map").
pub trait ModuleMap {
    fn get_module(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf>;

    /// Path of the `package.json` registered under `name`.
    fn get_package(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf>;
}
