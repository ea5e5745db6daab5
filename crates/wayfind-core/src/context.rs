//! Per-call bundle handed to the path-resolution algorithm.

use crate::error::LookupError;
use crate::module::Redirect;
use crate::resolution::PathResolver;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Session options plus the context of one `resolve_dependency` call.
///
/// Callbacks borrow from the orchestrator, so a context never outlives the
/// call that built it.
pub struct ResolutionContext<'a> {
    pub allow_pnp: bool,
    /// Whether the fast module map may be consulted.
    pub allow_haste: bool,
    pub does_file_exist: &'a dyn Fn(&Path) -> bool,
    pub extra_node_modules: Option<&'a HashMap<String, PathBuf>>,
    pub is_asset_file: &'a dyn Fn(&Path) -> bool,
    pub main_fields: &'a [String],
    /// Absolute path of the requesting module.
    pub origin_module_path: &'a Path,
    pub platform: Option<&'a str>,
    pub prefer_native_platform: bool,
    /// `(dir, asset name, platform)` to the matching file names in `dir`.
    pub resolve_asset: &'a dyn Fn(&Path, &str, Option<&str>) -> Option<Vec<String>>,
    pub resolve_request: Option<&'a dyn PathResolver>,
    pub source_exts: &'a [String],
    /// Redirect rewriting bound to the requesting module.
    pub redirect_module_path: &'a dyn Fn(&str) -> Redirect,
    pub resolve_haste_module: &'a dyn Fn(&str) -> Option<PathBuf>,
    pub resolve_haste_package: &'a dyn Fn(&str) -> Option<PathBuf>,
    /// `package.json` path to the entry point prefix.
    pub get_package_main_path: &'a dyn Fn(&Path) -> Result<PathBuf, LookupError>,
}

impl fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("allow_pnp", &self.allow_pnp)
            .field("allow_haste", &self.allow_haste)
            .field("extra_node_modules", &self.extra_node_modules)
            .field("main_fields", &self.main_fields)
            .field("origin_module_path", &self.origin_module_path)
            .field("platform", &self.platform)
            .field("prefer_native_platform", &self.prefer_native_platform)
            .field("has_resolve_request", &self.resolve_request.is_some())
            .field("source_exts", &self.source_exts)
            .finish_non_exhaustive()
    }
}
