//! Fast module map loaded from a JSON index.
//!
//! ```json
//! {
//!   "modules":  { "Button": { "g": "src/Button.js", "ios": "src/Button.ios.js" } },
//!   "packages": { "ui-kit": { "g": "libs/ui-kit/package.json" } }
//! }
//! ```
//!
//! `g` is the generic (platform independent) entry. Relative paths are
//! resolved against the directory holding the index file.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use wayfind_core::ModuleMap;

/// Platform key of the generic entry.
pub const GENERIC_PLATFORM: &str = "g";

/// Platform key tried before the generic one when native is supported.
pub const NATIVE_PLATFORM: &str = "native";

type PlatformPaths = HashMap<String, PathBuf>;

#[derive(Debug, Default, Deserialize)]
struct HasteMapFile {
    #[serde(default)]
    modules: HashMap<String, PlatformPaths>,
    #[serde(default)]
    packages: HashMap<String, PlatformPaths>,
}

/// Name index of modules and packages, per platform.
#[derive(Debug, Default, Clone)]
pub struct HasteMap {
    modules: HashMap<String, PlatformPaths>,
    packages: HashMap<String, PlatformPaths>,
}

impl HasteMap {
    /// Load an index file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::HasteMapRead {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new(""));
        let map = Self::from_json(&content, base_dir).map_err(|source| Error::HasteMapParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            modules = map.modules.len(),
            packages = map.packages.len(),
            "loaded module map"
        );
        Ok(map)
    }

    /// Parse an index, resolving relative paths against `base_dir`.
    pub fn from_json(content: &str, base_dir: &Path) -> serde_json::Result<Self> {
        let file: HasteMapFile = serde_json::from_str(content)?;
        let absolutize = |entries: HashMap<String, PlatformPaths>| -> HashMap<String, PlatformPaths> {
            entries
                .into_iter()
                .map(|(name, platforms)| {
                    let platforms = platforms
                        .into_iter()
                        .map(|(platform, path)| (platform, base_dir.join(path)))
                        .collect::<PlatformPaths>();
                    (name, platforms)
                })
                .collect()
        };

        Ok(Self {
            modules: absolutize(file.modules),
            packages: absolutize(file.packages),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.packages.is_empty()
    }
}

/// `platform`, then `native` when supported, then the generic entry.
fn lookup(
    entries: &HashMap<String, PlatformPaths>,
    name: &str,
    platform: Option<&str>,
    supports_native_platform: bool,
) -> Option<PathBuf> {
    let platforms = entries.get(name)?;

    platform
        .and_then(|platform| platforms.get(platform))
        .or_else(|| {
            supports_native_platform
                .then(|| platforms.get(NATIVE_PLATFORM))
                .flatten()
        })
        .or_else(|| platforms.get(GENERIC_PLATFORM))
        .cloned()
}

impl ModuleMap for HasteMap {
    fn get_module(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf> {
        lookup(&self.modules, name, platform, supports_native_platform)
    }

    fn get_package(
        &self,
        name: &str,
        platform: Option<&str>,
        supports_native_platform: bool,
    ) -> Option<PathBuf> {
        lookup(&self.packages, name, platform, supports_native_platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const INDEX: &str = r#"{
        "modules": {
            "Button": { "g": "src/Button.js", "ios": "src/Button.ios.js", "native": "src/Button.native.js" },
            "Only": { "android": "/abs/Only.android.js" }
        },
        "packages": {
            "ui-kit": { "g": "libs/ui-kit/package.json" }
        }
    }"#;

    fn map() -> HasteMap {
        HasteMap::from_json(INDEX, Path::new("/repo")).unwrap()
    }

    #[test]
    fn test_platform_native_generic_order() {
        let map = map();
        assert_eq!(
            map.get_module("Button", Some("ios"), true),
            Some(PathBuf::from("/repo/src/Button.ios.js"))
        );
        assert_eq!(
            map.get_module("Button", Some("android"), true),
            Some(PathBuf::from("/repo/src/Button.native.js"))
        );
        assert_eq!(
            map.get_module("Button", Some("android"), false),
            Some(PathBuf::from("/repo/src/Button.js"))
        );
        assert_eq!(
            map.get_module("Button", None, false),
            Some(PathBuf::from("/repo/src/Button.js"))
        );
    }

    #[test]
    fn test_absolute_paths_kept_and_missing_platform() {
        let map = map();
        assert_eq!(
            map.get_module("Only", Some("android"), true),
            Some(PathBuf::from("/abs/Only.android.js"))
        );
        assert_eq!(map.get_module("Only", Some("ios"), true), None);
        assert_eq!(map.get_module("Nope", None, true), None);
    }

    #[test]
    fn test_packages() {
        let map = map();
        assert_eq!(
            map.get_package("ui-kit", Some("ios"), true),
            Some(PathBuf::from("/repo/libs/ui-kit/package.json"))
        );
        assert_eq!(map.get_module("ui-kit", None, true), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("haste.json");
        std::fs::write(&path, INDEX).unwrap();

        let map = HasteMap::load(&path).unwrap();
        assert_eq!(
            map.get_module("Button", None, false),
            Some(dir.path().join("src/Button.js"))
        );
        assert!(!map.is_empty());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = HasteMap::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, Error::HasteMapRead { .. }));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"modules": []}"#).unwrap();
        let bad = HasteMap::load(&path).unwrap_err();
        assert!(matches!(bad, Error::HasteMapParse { .. }));
    }

    #[test]
    fn test_empty_sections_default() {
        let map = HasteMap::from_json("{}", Path::new("/")).unwrap();
        assert!(map.is_empty());
    }
}
