use super::{open_project, print_json};
use miette::Result;
use serde::Serialize;
use std::path::Path;
use wayfind_core::{Module, Redirect};

/// Redirect result for JSON output.
#[derive(Serialize)]
struct RedirectResult<'a> {
    from: String,
    name: &'a str,
    /// `false` when the specifier maps to the empty module.
    redirected: serde_json::Value,
}

/// Run the redirect command.
///
/// Prints the specifier the resolver will look for after the requesting
/// package's redirect map has been applied.
pub fn run(cwd: &Path, from: &Path, name: &str, json: bool) -> Result<()> {
    let project = open_project(cwd)?;
    let redirect = project.redirect(from, name);

    let redirected = match &redirect {
        Redirect::Path(path) => serde_json::Value::String(path.clone()),
        Redirect::Empty => serde_json::Value::Bool(false),
    };

    if json {
        return print_json(&RedirectResult {
            from: project.module(from).path().display().to_string(),
            name,
            redirected,
        });
    }

    match redirect {
        Redirect::Path(path) => println!("{path}"),
        Redirect::Empty => println!("false"),
    }
    Ok(())
}
