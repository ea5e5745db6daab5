//! Dependency resolution entry point.
//!
//! Builds the per-call [`ResolutionContext`], runs the path resolver and
//! turns its outcome into a module handle, or its failure into an
//! [`UnableToResolveError`](crate::UnableToResolveError).

use crate::context::ResolutionContext;
use crate::diagnostics::{failed_to_resolve_name, failed_to_resolve_path};
use crate::error::{Error, LookupError};
use crate::module::{Module, ModuleCache, ModuleMap, Package, Redirect};
use crate::options::ModuleResolutionOptions;
use crate::redirect::redirect_require;
use crate::resolution::{PathResolver, Resolution, ResolveError};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Module every `false` redirect resolves to.
pub const EMPTY_MODULE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/empty-module.js");

/// Resolves dependencies of modules for one bundling session.
pub struct ModuleResolution<C, R> {
    options: ModuleResolutionOptions<C>,
    resolver: R,
}

impl<C, R> ModuleResolution<C, R>
where
    C: ModuleCache,
    R: PathResolver,
{
    #[must_use]
    pub fn new(options: ModuleResolutionOptions<C>, resolver: R) -> Self {
        Self { options, resolver }
    }

    #[must_use]
    pub fn options(&self) -> &ModuleResolutionOptions<C> {
        &self.options
    }

    /// Resolve `module_name` as requested from `from_module`.
    ///
    /// `allow_haste` enables lookups in the fast module map.
    pub fn resolve_dependency(
        &self,
        from_module: &C::Module,
        module_name: &str,
        allow_haste: bool,
        platform: Option<&str>,
    ) -> Result<C::Module, Error> {
        let options = &self.options;
        let module_map: &dyn ModuleMap = &*options.module_map;

        let redirect_module_path = |spec: &str| self.redirect_require(from_module, spec);
        let resolve_haste_module = |name: &str| module_map.get_module(name, platform, true);
        let resolve_haste_package = |name: &str| module_map.get_package(name, platform, true);
        let get_package_main_path = |path: &Path| self.get_package_main_path(path);

        let context = ResolutionContext {
            allow_pnp: options.allow_pnp,
            allow_haste,
            does_file_exist: &*options.does_file_exist,
            extra_node_modules: options.extra_node_modules.as_ref(),
            is_asset_file: &*options.is_asset_file,
            main_fields: &options.main_fields,
            origin_module_path: from_module.path(),
            platform,
            prefer_native_platform: options.prefer_native_platform,
            resolve_asset: &*options.resolve_asset,
            resolve_request: options
                .resolve_request
                .as_deref()
                .map(|resolver| resolver as &dyn PathResolver),
            source_exts: &options.source_exts,
            redirect_module_path: &redirect_module_path,
            resolve_haste_module: &resolve_haste_module,
            resolve_haste_package: &resolve_haste_package,
            get_package_main_path: &get_package_main_path,
        };

        debug!(
            from = %from_module.path().display(),
            name = module_name,
            platform = platform.unwrap_or("none"),
            allow_haste,
            "resolving dependency"
        );

        match self.resolver.resolve(&context, module_name, platform) {
            Ok(resolution) => self.get_file_resolved_module(resolution),
            Err(ResolveError::FailedToResolvePath { file, dir }) => {
                debug!(name = module_name, "no file found");
                Err(failed_to_resolve_path(from_module.path(), module_name, &file, &dir).into())
            }
            Err(ResolveError::FailedToResolveName {
                dir_paths,
                extra_paths,
            }) => {
                debug!(name = module_name, "no name found");
                Err(failed_to_resolve_name(
                    from_module.path(),
                    module_name,
                    &dir_paths,
                    &extra_paths,
                    &*options.dir_exists,
                )
                .into())
            }
            Err(ResolveError::Other(err)) => Err(Error::Resolver(err)),
        }
    }

    /// Effective specifier for `module_path` after package redirects.
    pub fn redirect_require(&self, from_module: &C::Module, module_path: &str) -> Redirect {
        redirect_require(
            &self.options.module_cache,
            from_module,
            module_path,
            &self.options.main_fields,
        )
    }

    /// Entry point prefix of the package described by `package_json_path`.
    pub fn get_package_main_path(&self, package_json_path: &Path) -> Result<PathBuf, LookupError> {
        let package = self.options.module_cache.get_package(package_json_path)?;
        package.get_main(&self.options.main_fields)
    }

    /// The module handle a resolution stands for.
    ///
    /// Asset variants collapse to the lexicographically smallest path so
    /// the choice does not depend on directory listing order.
    pub fn get_file_resolved_module(&self, resolution: Resolution) -> Result<C::Module, Error> {
        let module_cache = &self.options.module_cache;

        match resolution {
            Resolution::SourceFile(path) => Ok(module_cache.get_module(&path)?),
            Resolution::AssetFiles(paths) => {
                let representative = paths
                    .iter()
                    .min_by(|a, b| a.as_os_str().cmp(b.as_os_str()))
                    .ok_or(Error::InvalidResolution("asset resolution has no files"))?;
                trace!(
                    representative = %representative.display(),
                    variants = paths.len(),
                    "collapsed asset files"
                );
                Ok(module_cache.get_module(representative)?)
            }
            Resolution::Empty => module_cache
                .get_module(Path::new(EMPTY_MODULE))
                .map_err(|_| Error::InvalidResolution("empty module is not available")),
        }
    }
}
