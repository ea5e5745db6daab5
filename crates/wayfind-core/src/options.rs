//! Session-wide resolution options.

use crate::module::{ModuleCache, ModuleMap};
use crate::resolution::PathResolver;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Predicate over a path (file or directory existence, asset classification).
pub type PathPredicate = dyn Fn(&Path) -> bool + Send + Sync;

/// `(dir, asset name, platform)` to the matching file names in `dir`.
pub type AssetResolver = dyn Fn(&Path, &str, Option<&str>) -> Option<Vec<String>> + Send + Sync;

/// Default fields consulted for the package entry point and redirect map.
pub const DEFAULT_MAIN_FIELDS: &[&str] = &["browser", "main"];

/// Default source extensions, without the leading dot.
pub const DEFAULT_SOURCE_EXTS: &[&str] = &["js", "json"];

/// Options built once per bundling session and read-only afterwards.
pub struct ModuleResolutionOptions<C> {
    pub allow_pnp: bool,
    pub dir_exists: Arc<PathPredicate>,
    pub does_file_exist: Arc<PathPredicate>,
    /// Package name to directory substitutions for bare names.
    pub extra_node_modules: Option<HashMap<String, PathBuf>>,
    pub is_asset_file: Arc<PathPredicate>,
    /// Prioritized `package.json` fields for both main and redirect lookups.
    pub main_fields: Vec<String>,
    pub module_cache: C,
    pub module_map: Arc<dyn ModuleMap + Send + Sync>,
    pub prefer_native_platform: bool,
    pub resolve_asset: Arc<AssetResolver>,
    pub resolve_request: Option<Arc<dyn PathResolver + Send + Sync>>,
    pub source_exts: Vec<String>,
}

impl<C: ModuleCache> ModuleResolutionOptions<C> {
    /// Options with nothing on disk, no assets and default field lists.
    #[must_use]
    pub fn new(module_cache: C, module_map: Arc<dyn ModuleMap + Send + Sync>) -> Self {
        Self {
            allow_pnp: false,
            dir_exists: Arc::new(never),
            does_file_exist: Arc::new(never),
            extra_node_modules: None,
            is_asset_file: Arc::new(never),
            main_fields: DEFAULT_MAIN_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            module_cache,
            module_map,
            prefer_native_platform: false,
            resolve_asset: Arc::new(no_assets),
            resolve_request: None,
            source_exts: DEFAULT_SOURCE_EXTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_allow_pnp(mut self, allow_pnp: bool) -> Self {
        self.allow_pnp = allow_pnp;
        self
    }

    #[must_use]
    pub fn with_dir_exists(mut self, f: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.dir_exists = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_does_file_exist(
        mut self,
        f: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.does_file_exist = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_extra_node_modules(mut self, extra: HashMap<String, PathBuf>) -> Self {
        self.extra_node_modules = Some(extra);
        self
    }

    #[must_use]
    pub fn with_is_asset_file(
        mut self,
        f: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_asset_file = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_main_fields(mut self, fields: Vec<String>) -> Self {
        self.main_fields = fields;
        self
    }

    #[must_use]
    pub fn with_prefer_native_platform(mut self, prefer: bool) -> Self {
        self.prefer_native_platform = prefer;
        self
    }

    #[must_use]
    pub fn with_resolve_asset(
        mut self,
        f: impl Fn(&Path, &str, Option<&str>) -> Option<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_asset = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_resolve_request(mut self, resolver: Arc<dyn PathResolver + Send + Sync>) -> Self {
        self.resolve_request = Some(resolver);
        self
    }

    #[must_use]
    pub fn with_source_exts(mut self, exts: Vec<String>) -> Self {
        self.source_exts = exts;
        self
    }
}

fn never(_: &Path) -> bool {
    false
}

fn no_assets(_: &Path, _: &str, _: Option<&str>) -> Option<Vec<String>> {
    None
}

impl<C> fmt::Debug for ModuleResolutionOptions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleResolutionOptions")
            .field("allow_pnp", &self.allow_pnp)
            .field("extra_node_modules", &self.extra_node_modules)
            .field("main_fields", &self.main_fields)
            .field("prefer_native_platform", &self.prefer_native_platform)
            .field("has_resolve_request", &self.resolve_request.is_some())
            .field("source_exts", &self.source_exts)
            .finish_non_exhaustive()
    }
}
