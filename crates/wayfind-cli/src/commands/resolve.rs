use super::{open_project, print_json};
use miette::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use wayfind_core::{Module, EMPTY_MODULE};
use wayfind_project::AssetType;

/// Resolution result for JSON output.
#[derive(Serialize)]
struct ResolveResult<'a> {
    ok: bool,
    from: String,
    name: &'a str,
    platform: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_empty_module: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the resolve command.
///
/// Exits with status 1 when the specifier cannot be resolved.
pub fn run(
    cwd: &Path,
    from: &Path,
    name: &str,
    platform: Option<&str>,
    allow_haste: bool,
    json: bool,
) -> Result<()> {
    let project = open_project(cwd)?;
    let from_path = project.module(from).path().display().to_string();

    match project.resolve(from, name, platform, allow_haste) {
        Ok(module) => {
            let resolved = module.path();
            let is_empty_module = resolved == Path::new(EMPTY_MODULE);
            debug!(
                resolved = %resolved.display(),
                is_empty_module,
                modules = project.resolution().options().module_cache.module_count(),
                "resolved"
            );

            if json {
                return print_json(&ResolveResult {
                    ok: true,
                    from: from_path,
                    name,
                    platform,
                    resolved: Some(resolved.display().to_string()),
                    is_empty_module: Some(is_empty_module),
                    asset_type: AssetType::of_path(resolved).map(AssetType::as_str),
                    error: None,
                });
            }

            println!("{}", resolved.display());
            Ok(())
        }
        Err(err) => {
            if json {
                print_json(&ResolveResult {
                    ok: false,
                    from: from_path,
                    name,
                    platform,
                    resolved: None,
                    is_empty_module: None,
                    asset_type: None,
                    error: Some(err.to_string()),
                })?;
            } else {
                eprintln!("error: {err}");
            }
            std::process::exit(1);
        }
    }
}
