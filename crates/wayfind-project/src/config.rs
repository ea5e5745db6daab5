//! Project configuration (`wayfind.json`).

use crate::assets::DEFAULT_ASSET_EXTS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolution settings for one project root.
///
/// Every key is optional in the file; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// `package.json` fields consulted for the entry point and redirects.
    pub main_fields: Vec<String>,

    /// Source extensions to probe, in order, without the leading dot.
    pub source_exts: Vec<String>,

    /// Extensions resolved through the asset resolver.
    pub asset_exts: Vec<String>,

    /// Probe `.native.<ext>` files after platform-specific ones.
    pub prefer_native_platform: bool,

    pub allow_pnp: bool,

    /// Package name to directory, relative to the project root or absolute.
    pub extra_node_modules: HashMap<String, PathBuf>,

    /// Module map JSON file, relative to the project root or absolute.
    pub haste_map: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            main_fields: vec!["browser".to_string(), "main".to_string()],
            source_exts: ["js", "json", "ts", "tsx"].map(String::from).to_vec(),
            asset_exts: DEFAULT_ASSET_EXTS.iter().map(|s| (*s).to_string()).collect(),
            prefer_native_platform: true,
            allow_pnp: false,
            extra_node_modules: HashMap::new(),
            haste_map: None,
        }
    }
}

impl ProjectConfig {
    pub const FILE_NAME: &'static str = "wayfind.json";

    /// Load `wayfind.json` from `root`, falling back to the defaults when
    /// the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(Self::FILE_NAME);
        if !path.is_file() {
            debug!(root = %root.display(), "no project config, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| Error::ConfigParse { path, source })
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    #[must_use]
    pub fn with_main_fields(mut self, fields: Vec<String>) -> Self {
        self.main_fields = fields;
        self
    }

    #[must_use]
    pub fn with_source_exts(mut self, exts: Vec<String>) -> Self {
        self.source_exts = exts;
        self
    }

    #[must_use]
    pub fn with_asset_exts(mut self, exts: Vec<String>) -> Self {
        self.asset_exts = exts;
        self
    }

    #[must_use]
    pub fn with_prefer_native_platform(mut self, prefer: bool) -> Self {
        self.prefer_native_platform = prefer;
        self
    }

    #[must_use]
    pub fn with_allow_pnp(mut self, allow: bool) -> Self {
        self.allow_pnp = allow;
        self
    }

    #[must_use]
    pub fn with_extra_node_module(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.extra_node_modules.insert(name.into(), dir.into());
        self
    }

    #[must_use]
    pub fn with_haste_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.haste_map = Some(path.into());
        self
    }
}
