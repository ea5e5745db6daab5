//! A project root wired into [`ModuleResolution`].

use crate::assets::{is_asset_file, resolve_asset};
use crate::cache::{ProjectModule, ProjectModuleCache};
use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::haste::HasteMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use wayfind_core::paths::normalize;
use wayfind_core::{ModuleResolution, ModuleResolutionOptions, Redirect};
use wayfind_resolver::DefaultResolver;

/// Resolves dependencies of modules inside one project root.
pub struct ProjectResolver {
    root: PathBuf,
    config: ProjectConfig,
    resolution: ModuleResolution<ProjectModuleCache, DefaultResolver>,
}

impl ProjectResolver {
    /// Open `root`, reading `wayfind.json` when present.
    pub fn open(root: &Path) -> Result<Self> {
        let root = canonical_root(root)?;
        let config = ProjectConfig::load(&root)?;
        Self::with_config(&root, config)
    }

    /// Open `root` with an explicit configuration.
    pub fn with_config(root: &Path, config: ProjectConfig) -> Result<Self> {
        let root = canonical_root(root)?;

        let haste_map = match &config.haste_map {
            Some(path) => {
                let haste_map = HasteMap::load(&root.join(path))?;
                if haste_map.is_empty() {
                    warn!(path = %path.display(), "module map has no entries");
                }
                haste_map
            }
            None => HasteMap::default(),
        };

        let extra_node_modules: HashMap<String, PathBuf> = config
            .extra_node_modules
            .iter()
            .map(|(name, dir)| (name.clone(), normalize(&root.join(dir))))
            .collect();

        let asset_exts = config.asset_exts.clone();
        let mut options = ModuleResolutionOptions::new(ProjectModuleCache::new(), Arc::new(haste_map))
            .with_allow_pnp(config.allow_pnp)
            .with_dir_exists(Path::is_dir)
            .with_does_file_exist(Path::is_file)
            .with_is_asset_file(move |path| is_asset_file(path, &asset_exts))
            .with_main_fields(config.main_fields.clone())
            .with_prefer_native_platform(config.prefer_native_platform)
            .with_resolve_asset(resolve_asset)
            .with_source_exts(config.source_exts.clone());
        if !extra_node_modules.is_empty() {
            options = options.with_extra_node_modules(extra_node_modules);
        }

        debug!(root = %root.display(), ?options, "opened project");

        Ok(Self {
            root,
            config,
            resolution: ModuleResolution::new(options, DefaultResolver),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    #[must_use]
    pub fn resolution(&self) -> &ModuleResolution<ProjectModuleCache, DefaultResolver> {
        &self.resolution
    }

    /// Handle of the module at `path`, relative to the root or absolute.
    #[must_use]
    pub fn module(&self, path: &Path) -> ProjectModule {
        self.resolution
            .options()
            .module_cache
            .module(&normalize(&self.root.join(path)))
    }

    /// Resolve `name` as required from the module at `from`.
    pub fn resolve(
        &self,
        from: &Path,
        name: &str,
        platform: Option<&str>,
        allow_haste: bool,
    ) -> std::result::Result<ProjectModule, wayfind_core::Error> {
        let from_module = self.module(from);
        self.resolution
            .resolve_dependency(&from_module, name, allow_haste, platform)
    }

    /// Effective specifier for `name` as required from `from`.
    #[must_use]
    pub fn redirect(&self, from: &Path, name: &str) -> Redirect {
        let from_module = self.module(from);
        self.resolution.redirect_require(&from_module, name)
    }
}

fn canonical_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(Error::other(format!(
            "project root {} is not a directory",
            root.display()
        )));
    }
    Ok(dunce::canonicalize(root)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use wayfind_core::{Module, EMPTY_MODULE};

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> (tempfile::TempDir, ProjectResolver) {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "package.json",
            r#"{
                "name": "app",
                "browser": {
                    "./src/foo.js": "./src/foo.browser.js",
                    "./src/server.js": false,
                    "fs": false,
                    "http": "./shims/http.js"
                }
            }"#,
        );
        write(root, "src/index.js", "");
        write(root, "src/foo.js", "");
        write(root, "src/foo.browser.js", "");
        write(root, "src/server.js", "");
        write(root, "src/button.ios.js", "");
        write(root, "src/button.native.js", "");
        write(root, "src/button.js", "");
        write(root, "src/img/logo.png", "");
        write(root, "src/img/logo@2x.png", "");
        write(root, "shims/http.js", "");
        write(
            root,
            "node_modules/dep/package.json",
            r#"{"main": "lib/node.js", "browser": {"./lib/node.js": "./lib/browser.js"}}"#,
        );
        write(root, "node_modules/dep/lib/node.js", "");
        write(root, "node_modules/dep/lib/browser.js", "");

        let resolver = ProjectResolver::open(root).unwrap();
        (dir, resolver)
    }

    fn resolved(resolver: &ProjectResolver, name: &str, platform: Option<&str>) -> PathBuf {
        resolver
            .resolve(Path::new("src/index.js"), name, platform, true)
            .unwrap()
            .path()
            .to_path_buf()
    }

    #[test]
    fn test_relative_redirect() {
        let (_dir, resolver) = project();
        assert_eq!(
            resolved(&resolver, "./foo", None),
            resolver.root().join("src/foo.browser.js")
        );
        assert_eq!(
            resolver.redirect(Path::new("src/index.js"), "./foo"),
            Redirect::Path("./foo.browser.js".into())
        );
    }

    #[test]
    fn test_false_redirects_to_empty_module() {
        let (_dir, resolver) = project();
        assert_eq!(resolved(&resolver, "./server", None), Path::new(EMPTY_MODULE));
        assert_eq!(resolved(&resolver, "fs", None), Path::new(EMPTY_MODULE));
    }

    #[test]
    fn test_bare_redirect_to_file() {
        let (_dir, resolver) = project();
        assert_eq!(
            resolved(&resolver, "http", None),
            resolver.root().join("shims/http.js")
        );
    }

    #[test]
    fn test_platform_files() {
        let (_dir, resolver) = project();
        assert_eq!(
            resolved(&resolver, "./button", Some("ios")),
            resolver.root().join("src/button.ios.js")
        );
        assert_eq!(
            resolved(&resolver, "./button", Some("android")),
            resolver.root().join("src/button.native.js")
        );
    }

    #[test]
    fn test_asset_collapses_to_smallest() {
        let (_dir, resolver) = project();
        assert_eq!(
            resolved(&resolver, "./img/logo.png", None),
            resolver.root().join("src/img/logo.png")
        );
    }

    #[test]
    fn test_native_asset_variant_sorts_first() {
        let (_dir, resolver) = project();
        write(resolver.root(), "src/img/logo.native.png", "");
        // `logo.native.png` < `logo.png` byte-wise, with or without a platform.
        for platform in [None, Some("ios")] {
            assert_eq!(
                resolved(&resolver, "./img/logo.png", platform),
                resolver.root().join("src/img/logo.native.png")
            );
        }
    }

    #[test]
    fn test_node_modules_main_with_browser_map() {
        let (_dir, resolver) = project();
        assert_eq!(
            resolved(&resolver, "dep", None),
            resolver.root().join("node_modules/dep/lib/browser.js")
        );
    }

    #[test]
    fn test_missing_module_message() {
        let (_dir, resolver) = project();
        let err = resolver
            .resolve(Path::new("src/index.js"), "./missing", None, true)
            .unwrap_err();
        assert!(err.is_unable_to_resolve());
        let message = err.to_string();
        assert!(message.starts_with("Unable to resolve module `./missing` from `"));
        assert!(message.contains("None of these files exist:"));

        let err = resolver
            .resolve(Path::new("src/index.js"), "leftpad", None, true)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Module does not exist in the module map\n"));

        // Installed but empty: the directory is listed.
        write(resolver.root(), "node_modules/leftpad/README.md", "");
        let err = resolver
            .resolve(Path::new("src/index.js"), "leftpad", None, true)
            .unwrap_err();
        assert!(err.to_string().contains(&format!(
            "or in these directories:\n  {}\n",
            resolver.root().join("node_modules").display()
        )));
    }

    #[test]
    fn test_haste_map_and_extra_node_modules() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "src/index.js", "");
        write(root, "src/Widget.js", "");
        write(root, "vendor/shared/util.js", "");
        write(root, "haste.json", r#"{"modules": {"Widget": {"g": "src/Widget.js"}}}"#);
        write(
            root,
            "wayfind.json",
            r#"{"hasteMap": "haste.json", "extraNodeModules": {"shared": "vendor/shared"}}"#,
        );

        let resolver = ProjectResolver::open(root).unwrap();
        assert_eq!(
            resolved(&resolver, "Widget", None),
            resolver.root().join("src/Widget.js")
        );
        assert_eq!(
            resolved(&resolver, "shared/util", None),
            resolver.root().join("vendor/shared/util.js")
        );

        let err = resolver
            .resolve(Path::new("src/index.js"), "Widget", None, false)
            .unwrap_err();
        assert!(err.is_unable_to_resolve());
    }

    #[test]
    fn test_empty_haste_map_still_opens() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "src/index.js", "");
        write(root, "haste.json", "{}");
        let config = ProjectConfig::default().with_haste_map("haste.json");

        let resolver = ProjectResolver::with_config(root, config.clone()).unwrap();
        assert_eq!(resolver.config(), &config);

        let cache = &resolver.resolution().options().module_cache;
        assert_eq!(cache.module_count(), 0);
        let err = resolver
            .resolve(Path::new("src/index.js"), "Widget", None, true)
            .unwrap_err();
        assert!(err.is_unable_to_resolve());
        assert!(cache.module_count() >= 1);
    }

    #[test]
    fn test_open_rejects_files() {
        let dir = tempdir().unwrap();
        write(dir.path(), "file.txt", "");
        let result = ProjectResolver::open(&dir.path().join("file.txt"));
        assert!(matches!(result, Err(Error::Other(_))));
    }

    #[test]
    fn test_bad_haste_map_fails_open() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::default().with_haste_map("missing.json");
        let result = ProjectResolver::with_config(dir.path(), config);
        assert!(matches!(result, Err(Error::HasteMapRead { .. })));
    }
}
