//! `package.json` handles: entry point and redirect (browser map) lookups.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::trace;
use wayfind_core::paths::{dirname, is_absolute_specifier, is_relative_specifier, normalize, relative_specifier};
use wayfind_core::{LookupError, Package, Redirect};

/// A package, identified by the path of its `package.json`.
///
/// The file is read on first use and the parsed value shared by every
/// clone of the handle.
#[derive(Debug, Clone)]
pub struct ProjectPackage {
    inner: Arc<PackageInner>,
}

#[derive(Debug)]
struct PackageInner {
    path: PathBuf,
    root: PathBuf,
    json: OnceLock<Result<Map<String, Value>, LookupError>>,
}

impl ProjectPackage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let root = dirname(&path).to_path_buf();
        Self {
            inner: Arc::new(PackageInner {
                path,
                root,
                json: OnceLock::new(),
            }),
        }
    }

    /// Directory containing `package.json`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    fn json(&self) -> Result<&Map<String, Value>, LookupError> {
        self.inner
            .json
            .get_or_init(|| read_package_json(&self.inner.path))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Merge of every object-valued main field except `main`; earlier
    /// fields win. `None` when no field declares a map.
    fn replacements(
        &self,
        main_fields: &[String],
    ) -> Result<Option<HashMap<String, Redirect>>, LookupError> {
        let json = self.json()?;
        let mut replacements = HashMap::new();
        let mut found = false;

        for field in main_fields.iter().filter(|field| *field != "main") {
            let Some(Value::Object(map)) = json.get(field) else {
                continue;
            };
            found = true;
            for (key, value) in map {
                let redirect = match value {
                    Value::String(target) => Redirect::Path(target.clone()),
                    Value::Bool(false) => Redirect::Empty,
                    _ => continue,
                };
                replacements.entry(key.clone()).or_insert(redirect);
            }
        }

        Ok(found.then_some(replacements))
    }
}

impl Package for ProjectPackage {
    fn path(&self) -> &Path {
        &self.inner.path
    }

    fn redirect_require(
        &self,
        name: &str,
        main_fields: &[String],
    ) -> Result<Option<Redirect>, LookupError> {
        let Some(replacements) = self.replacements(main_fields)? else {
            return Ok(None);
        };

        let absolute = is_absolute_specifier(name);
        if !absolute && !is_relative_specifier(name) {
            return Ok(replacements.get(name).cloned());
        }

        let relative = relative_specifier(self.root(), Path::new(name));
        let redirect = [
            relative.clone(),
            format!("{relative}.js"),
            format!("{relative}.json"),
        ]
        .iter()
        .find_map(|key| replacements.get(key))
        .cloned();

        trace!(package = %self.inner.path.display(), name, ?redirect, "redirect lookup");

        Ok(redirect.map(|redirect| match redirect {
            Redirect::Path(target) if absolute => Redirect::Path(
                normalize(&self.root().join(target))
                    .to_string_lossy()
                    .into_owned(),
            ),
            Redirect::Path(target) => Redirect::Path(relative_specifier(self.root(), Path::new(&target))),
            Redirect::Empty => Redirect::Empty,
        }))
    }

    fn get_main(&self, main_fields: &[String]) -> Result<PathBuf, LookupError> {
        let json = self.json()?;
        let mut main = main_fields
            .iter()
            .find_map(|field| json.get(field).and_then(Value::as_str))
            .unwrap_or("index")
            .to_string();

        if let Some(replacements) = self.replacements(main_fields)? {
            let alternate = match main.strip_prefix("./") {
                Some(stripped) => stripped.to_string(),
                None => format!("./{main}"),
            };

            let winner = [main.clone(), alternate].iter().find_map(|variant| {
                let stripped = variant
                    .strip_suffix(".js")
                    .or_else(|| variant.strip_suffix(".json"))
                    .unwrap_or(variant);
                [
                    variant.clone(),
                    format!("{variant}.js"),
                    format!("{variant}.json"),
                    stripped.to_string(),
                ]
                .iter()
                .find_map(|key| replacements.get(key).and_then(Redirect::as_path))
                .map(str::to_string)
            });

            if let Some(winner) = winner {
                main = winner;
            }
        }

        Ok(normalize(&self.root().join(main)))
    }
}

fn read_package_json(path: &Path) -> Result<Map<String, Value>, LookupError> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            LookupError::PackageNotFound(path.to_path_buf())
        } else {
            LookupError::InvalidPackage {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LookupError::InvalidPackage {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        }),
        Err(err) => Err(LookupError::InvalidPackage {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
    }
}
