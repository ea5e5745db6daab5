//! In-memory collaborators for unit tests.

use crate::context::ResolutionContext;
use crate::error::LookupError;
use crate::module::{Module, ModuleCache, ModuleMap, Package, Redirect};
use crate::paths::dirname;
use crate::resolution::{PathResolver, Resolution, ResolveError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FakePackage {
    path: PathBuf,
    redirects: HashMap<String, Redirect>,
    mains: Vec<(String, String)>,
    invalid: bool,
}

impl FakePackage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            redirects: HashMap::new(),
            mains: Vec::new(),
            invalid: false,
        }
    }

    pub fn with_redirect(mut self, from: &str, to: Redirect) -> Self {
        self.redirects.insert(from.to_string(), to);
        self
    }

    pub fn with_main(mut self, field: &str, value: &str) -> Self {
        self.mains.push((field.to_string(), value.to_string()));
        self
    }

    /// Every query fails as if the metadata were malformed.
    pub fn invalid(mut self) -> Self {
        self.invalid = true;
        self
    }

    fn check(&self) -> Result<(), LookupError> {
        if self.invalid {
            return Err(LookupError::InvalidPackage {
                path: self.path.clone(),
                message: "malformed".to_string(),
            });
        }
        Ok(())
    }
}

impl Package for FakePackage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn redirect_require(
        &self,
        name: &str,
        _main_fields: &[String],
    ) -> Result<Option<Redirect>, LookupError> {
        self.check()?;
        Ok(self.redirects.get(name).cloned())
    }

    fn get_main(&self, main_fields: &[String]) -> Result<PathBuf, LookupError> {
        self.check()?;
        let main = main_fields
            .iter()
            .find_map(|field| {
                self.mains
                    .iter()
                    .find(|(name, _)| name == field)
                    .map(|(_, value)| value.as_str())
            })
            .unwrap_or("index");
        Ok(dirname(&self.path).join(main))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeModule {
    path: PathBuf,
    package: Option<PathBuf>,
    packages: Vec<FakePackage>,
}

impl PartialEq for FakePackage {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Module for FakeModule {
    type Package = FakePackage;

    fn path(&self) -> &Path {
        &self.path
    }

    fn get_package(&self) -> Result<Option<FakePackage>, LookupError> {
        Ok(self.package.as_ref().and_then(|path| {
            self.packages
                .iter()
                .find(|package| &package.path == path)
                .cloned()
        }))
    }
}

/// Module cache over registered packages.
///
/// Lenient caches hand out a module for any path; strict ones only for
/// paths registered with [`FakeCache::with_module`].
#[derive(Debug, Clone)]
pub struct FakeCache {
    strict: bool,
    modules: HashSet<PathBuf>,
    packages: Vec<FakePackage>,
}

impl FakeCache {
    pub fn lenient() -> Self {
        Self {
            strict: false,
            modules: HashSet::new(),
            packages: Vec::new(),
        }
    }

    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::lenient()
        }
    }

    pub fn with_package(mut self, package: FakePackage) -> Self {
        self.packages.push(package);
        self
    }

    pub fn with_module(mut self, path: impl Into<PathBuf>) -> Self {
        self.modules.insert(path.into());
        self
    }

    pub fn module(&self, path: &str) -> FakeModule {
        self.get_module(Path::new(path)).unwrap()
    }

    /// Deepest registered package whose directory contains `path`.
    fn owning_package(&self, path: &Path) -> Option<PathBuf> {
        self.packages
            .iter()
            .map(|package| package.path.as_path())
            .filter(|package| path.starts_with(dirname(package)))
            .max_by_key(|package| package.components().count())
            .map(Path::to_path_buf)
    }
}

impl ModuleCache for FakeCache {
    type Package = FakePackage;
    type Module = FakeModule;

    fn get_module(&self, path: &Path) -> Result<FakeModule, LookupError> {
        if self.strict && !self.modules.contains(path) {
            return Err(LookupError::ModuleNotFound(path.to_path_buf()));
        }
        Ok(FakeModule {
            path: path.to_path_buf(),
            package: self.owning_package(path),
            packages: self.packages.clone(),
        })
    }

    fn get_package(&self, path: &Path) -> Result<FakePackage, LookupError> {
        self.packages
            .iter()
            .find(|package| package.path == path)
            .cloned()
            .ok_or_else(|| LookupError::PackageNotFound(path.to_path_buf()))
    }
}

/// Fast module map keyed by `(name, platform)`; answers only when asked
/// with native platform support, as the orchestrator always does.
#[derive(Debug, Default)]
pub struct FakeModuleMap {
    modules: HashMap<(String, Option<String>), PathBuf>,
    packages: HashMap<(String, Option<String>), PathBuf>,
}

impl FakeModuleMap {
    pub fn with_module(mut self, name: &str, platform: Option<&str>, path: &str) -> Self {
        self.modules.insert(
            (name.to_string(), platform.map(str::to_string)),
            PathBuf::from(path),
        );
        self
    }

    pub fn with_package(mut self, name: &str, platform: Option<&str>, path: &str) -> Self {
        self.packages.insert(
            (name.to_string(), platform.map(str::to_string)),
            PathBuf::from(path),
        );
        self
    }
}

impl ModuleMap for FakeModuleMap {
    fn get_module(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf> {
        if !supports_native_platform {
            return None;
        }
        self.modules
            .get(&(name.to_string(), platform.map(str::to_string)))
            .cloned()
    }

    fn get_package(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf> {
        if !supports_native_platform {
            return None;
        }
        self.packages
            .get(&(name.to_string(), platform.map(str::to_string)))
            .cloned()
    }
}

type ResolveFn = dyn Fn(&ResolutionContext<'_>, &str, Option<&str>) -> Result<Resolution, ResolveError>;

/// Path resolver driven by a closure.
pub struct ScriptedResolver {
    script: Box<ResolveFn>,
}

impl ScriptedResolver {
    pub fn new(
        script: impl Fn(&ResolutionContext<'_>, &str, Option<&str>) -> Result<Resolution, ResolveError>
            + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
        }
    }
}

impl PathResolver for ScriptedResolver {
    fn resolve(
        &self,
        context: &ResolutionContext<'_>,
        module_name: &str,
        platform: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        (self.script)(context, module_name, platform)
    }
}
