pub mod empty_module;
pub mod redirect;
pub mod resolve;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use wayfind_project::ProjectResolver;

/// Open the project rooted at `cwd`.
pub fn open_project(cwd: &Path) -> Result<ProjectResolver> {
    let project = ProjectResolver::open(cwd).into_diagnostic()?;
    debug!(root = %project.root().display(), config = ?project.config(), "project");
    Ok(project)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}
