//! Turning resolver failures into actionable "unable to resolve" messages.

use crate::paths::dirname;
use crate::resolution::FileCandidates;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Generic steps appended to every module map failure.
const MODULE_MAP_REMEDIATION: &[&str] = &[
    "",
    "To resolve try the following:",
    "  1. Clear watchman watches: `watchman watch-del-all`.",
    "  2. Delete the `node_modules/` folder and reinstall: `rm -rf node_modules/ && npm install`.",
    "  3. Reset the bundler cache: `rm -rf /tmp/wayfind-cache-*`.",
];

/// A module could not be resolved.
///
/// Built once per failed resolution and never modified afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UnableToResolveError {
    origin_module_path: PathBuf,
    target_module_name: String,
    message: String,
}

impl UnableToResolveError {
    pub fn new(
        origin_module_path: impl Into<PathBuf>,
        target_module_name: impl Into<String>,
        details: &str,
    ) -> Self {
        let origin_module_path = origin_module_path.into();
        let target_module_name = target_module_name.into();
        let message = format!(
            "Unable to resolve module `{target_module_name}` from `{}`: {details}",
            origin_module_path.display()
        );
        Self {
            origin_module_path,
            target_module_name,
            message,
        }
    }

    /// Path of the module that made the request.
    #[must_use]
    pub fn origin_module_path(&self) -> &Path {
        &self.origin_module_path
    }

    /// The specifier as it was requested.
    #[must_use]
    pub fn target_module_name(&self) -> &str {
        &self.target_module_name
    }

    /// The full multi-line message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A relative or absolute specifier matched nothing: list what was tried.
#[must_use]
pub fn failed_to_resolve_path(
    origin_module_path: &Path,
    target_module_name: &str,
    file_candidates: &[FileCandidates],
    dir_candidates: &[FileCandidates],
) -> UnableToResolveError {
    let mut lines = vec!["None of these files exist:".to_string()];
    lines.extend(
        file_candidates
            .iter()
            .chain(dir_candidates)
            .map(|candidates| format!("  * `{candidates}`")),
    );

    UnableToResolveError::new(origin_module_path, target_module_name, &lines.join("\n"))
}

/// A bare name was not in the module map nor in any `node_modules`.
///
/// Only directories that exist are listed, by their parent directory.
#[must_use]
pub fn failed_to_resolve_name(
    origin_module_path: &Path,
    target_module_name: &str,
    dir_paths: &[PathBuf],
    extra_paths: &[PathBuf],
    dir_exists: &dyn Fn(&Path) -> bool,
) -> UnableToResolveError {
    let display_dirs: Vec<&Path> = dir_paths
        .iter()
        .filter(|dir| dir_exists(dir))
        .chain(extra_paths)
        .map(|dir| dirname(dir))
        .collect();

    let hint = if display_dirs.is_empty() {
        ""
    } else {
        " or in these directories:"
    };

    let mut lines = vec![format!("Module does not exist in the module map{hint}")];
    lines.extend(display_dirs.iter().map(|dir| format!("  {}", dir.display())));
    lines.extend(MODULE_MAP_REMEDIATION.iter().map(|line| (*line).to_string()));

    UnableToResolveError::new(origin_module_path, target_module_name, &lines.join("\n"))
}
