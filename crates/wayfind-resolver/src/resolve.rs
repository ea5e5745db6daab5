//! Path resolution.
//!
//! Supports:
//! - Relative and absolute specifiers, after package redirects
//! - Bare specifiers via the module map, a custom resolver, `node_modules`
//!   lookup and `extra_node_modules`
//! - Extension probing with platform (`.ios.js`) and native (`.native.js`)
//!   variants
//! - Directory resolution (`package.json` main, then `index.*`)
//! - Asset variants through the asset resolver

use crate::error::ResolverError;
use std::path::{Path, PathBuf};
use tracing::trace;
use wayfind_core::paths::{dirname, is_absolute_specifier, is_relative_specifier, normalize};
use wayfind_core::{
    FileCandidates, PathResolver, Redirect, Resolution, ResolutionContext, ResolveError,
};

/// Outcome of probing one location.
enum Probe<C> {
    Resolved(Resolution),
    Failed(C),
}

/// The default [`PathResolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl PathResolver for DefaultResolver {
    fn resolve(
        &self,
        context: &ResolutionContext<'_>,
        module_name: &str,
        platform: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        resolve(context, module_name, platform)
    }
}

/// Resolve `module_name` requested from `ctx.origin_module_path`.
pub fn resolve(
    ctx: &ResolutionContext<'_>,
    module_name: &str,
    platform: Option<&str>,
) -> Result<Resolution, ResolveError> {
    if is_relative_specifier(module_name) || is_absolute_specifier(module_name) {
        return resolve_module_path(ctx, Path::new(module_name), platform);
    }

    let real_module_name = match (ctx.redirect_module_path)(module_name) {
        Redirect::Path(name) => name,
        Redirect::Empty => return Ok(Resolution::Empty),
    };

    // A bare name redirected to a path: the path is relative to the package
    // that declared the redirect.
    if is_relative_specifier(&real_module_name) || is_absolute_specifier(&real_module_name) {
        let target = origin_package_root(ctx).join(&real_module_name);
        return resolve_module_path(ctx, &target, platform);
    }

    if ctx.allow_haste {
        if let Some(resolution) = resolve_haste_name(ctx, &real_module_name, platform)? {
            trace!(name = module_name, "resolved through module map");
            return Ok(resolution);
        }
    }

    if let Some(custom) = ctx.resolve_request {
        match custom.resolve(ctx, &real_module_name, platform) {
            Ok(resolution) => return Ok(resolution),
            Err(err) => trace!(name = %real_module_name, error = %err, "custom resolver declined"),
        }
    }

    resolve_node_modules(ctx, module_name, &real_module_name, platform)
}

/// Resolve a path relative to the origin module (or absolute).
fn resolve_module_path(
    ctx: &ResolutionContext<'_>,
    to_module: &Path,
    platform: Option<&str>,
) -> Result<Resolution, ResolveError> {
    let origin_dir = dirname(ctx.origin_module_path);
    let module_path = normalize(&origin_dir.join(to_module));

    let redirected = match (ctx.redirect_module_path)(&module_path.to_string_lossy()) {
        Redirect::Path(path) => normalize(&origin_dir.join(path)),
        Redirect::Empty => return Ok(Resolution::Empty),
    };

    match resolve_file_or_dir(ctx, &redirected, platform)? {
        Probe::Resolved(resolution) => Ok(resolution),
        Probe::Failed((file, dir)) => Err(ResolveError::FailedToResolvePath {
            file: vec![file],
            dir: vec![dir],
        }),
    }
}

/// Bare name lookup in every ancestor `node_modules`, then in
/// `extra_node_modules`.
fn resolve_node_modules(
    ctx: &ResolutionContext<'_>,
    module_name: &str,
    real_module_name: &str,
    platform: Option<&str>,
) -> Result<Resolution, ResolveError> {
    let dir_paths: Vec<PathBuf> = dirname(ctx.origin_module_path)
        .ancestors()
        .filter(|dir| dir.parent().is_some() && !dir.ends_with("node_modules"))
        .map(|dir| dir.join("node_modules").join(real_module_name))
        .collect();

    let mut extra_paths = Vec::new();
    if let Some(extra_node_modules) = ctx.extra_node_modules {
        let (package_name, subpath) = parse_bare_specifier(module_name);
        if let Some(package_dir) = extra_node_modules.get(package_name) {
            extra_paths.push(match subpath {
                Some(sub) => package_dir.join(sub),
                None => package_dir.clone(),
            });
        }
    }

    for candidate in dir_paths.iter().chain(&extra_paths) {
        let redirected = match (ctx.redirect_module_path)(&candidate.to_string_lossy()) {
            Redirect::Path(path) => PathBuf::from(path),
            Redirect::Empty => return Ok(Resolution::Empty),
        };

        if let Probe::Resolved(resolution) = resolve_file_or_dir(ctx, &redirected, platform)? {
            return Ok(resolution);
        }
    }

    Err(ResolveError::FailedToResolveName {
        dir_paths,
        extra_paths,
    })
}

/// Look `module_name` up in the module map, as a module and then as a path
/// inside a registered package.
fn resolve_haste_name(
    ctx: &ResolutionContext<'_>,
    module_name: &str,
    platform: Option<&str>,
) -> Result<Option<Resolution>, ResolveError> {
    if let Some(path) = (ctx.resolve_haste_module)(module_name) {
        return Ok(Some(Resolution::SourceFile(path)));
    }

    let mut package_name = module_name;
    let mut package_json = (ctx.resolve_haste_package)(package_name);
    while package_json.is_none() {
        let Some(pos) = package_name.rfind('/') else {
            break;
        };
        package_name = &package_name[..pos];
        package_json = (ctx.resolve_haste_package)(package_name);
    }

    let Some(package_json) = package_json else {
        return Ok(None);
    };

    let path_in_module = module_name.get(package_name.len() + 1..).unwrap_or("");
    let potential_module_path = dirname(&package_json).join(path_in_module);

    match resolve_file_or_dir(ctx, &potential_module_path, platform)? {
        Probe::Resolved(resolution) => Ok(Some(resolution)),
        Probe::Failed((file_candidates, dir_candidates)) => Err(ResolveError::other(
            ResolverError::MissingFileInHastePackage {
                module_name: module_name.to_string(),
                package_name: package_name.to_string(),
                path_in_module: path_in_module.to_string(),
                file_candidates,
                dir_candidates,
            },
        )),
    }
}

/// Try `path` as a file, then as a directory.
fn resolve_file_or_dir(
    ctx: &ResolutionContext<'_>,
    path: &Path,
    platform: Option<&str>,
) -> Result<Probe<(FileCandidates, FileCandidates)>, ResolveError> {
    let file_name = file_name_of(path);

    let file_candidates = match resolve_file(ctx, dirname(path), &file_name, platform) {
        Probe::Resolved(resolution) => return Ok(Probe::Resolved(resolution)),
        Probe::Failed(candidates) => candidates,
    };

    let dir_candidates = match resolve_dir(ctx, path, platform)? {
        Probe::Resolved(resolution) => return Ok(Probe::Resolved(resolution)),
        Probe::Failed(candidates) => candidates,
    };

    Ok(Probe::Failed((file_candidates, dir_candidates)))
}

/// Resolve a directory (`package.json` main > `index.*`).
fn resolve_dir(
    ctx: &ResolutionContext<'_>,
    dir: &Path,
    platform: Option<&str>,
) -> Result<Probe<FileCandidates>, ResolveError> {
    let package_json = dir.join("package.json");
    if (ctx.does_file_exist)(&package_json) {
        return resolve_package(ctx, &package_json, platform).map(Probe::Resolved);
    }

    Ok(resolve_file(ctx, dir, "index", platform))
}

/// Resolve the entry point of a package: the main prefix as a file, then
/// `<main>/index`.
fn resolve_package(
    ctx: &ResolutionContext<'_>,
    package_json: &Path,
    platform: Option<&str>,
) -> Result<Resolution, ResolveError> {
    let main_prefix = (ctx.get_package_main_path)(package_json)?;

    let file_candidates =
        match resolve_file(ctx, dirname(&main_prefix), &file_name_of(&main_prefix), platform) {
            Probe::Resolved(resolution) => return Ok(resolution),
            Probe::Failed(candidates) => candidates,
        };

    let index_candidates = match resolve_file(ctx, &main_prefix, "index", platform) {
        Probe::Resolved(resolution) => return Ok(resolution),
        Probe::Failed(candidates) => candidates,
    };

    Err(ResolveError::other(ResolverError::InvalidPackage {
        package_json_path: package_json.to_path_buf(),
        main_prefix_path: main_prefix,
        file_candidates,
        index_candidates,
    }))
}

/// Resolve `dir/file_name_hint` as an asset or a source file.
fn resolve_file(
    ctx: &ResolutionContext<'_>,
    dir: &Path,
    file_name_hint: &str,
    platform: Option<&str>,
) -> Probe<FileCandidates> {
    if (ctx.is_asset_file)(Path::new(file_name_hint)) {
        return match (ctx.resolve_asset)(dir, file_name_hint, platform) {
            Some(names) if !names.is_empty() => Probe::Resolved(Resolution::AssetFiles(
                names.iter().map(|name| dir.join(name)).collect(),
            )),
            _ => Probe::Failed(FileCandidates::Asset(file_name_hint.to_string())),
        };
    }

    let file_path_prefix = dir.join(file_name_hint);
    let mut candidate_exts = Vec::new();

    match resolve_source_file(ctx, &file_path_prefix, platform, &mut candidate_exts) {
        Some(path) => Probe::Resolved(Resolution::SourceFile(path)),
        None => Probe::Failed(FileCandidates::SourceFile {
            file_path_prefix,
            candidate_exts,
        }),
    }
}

/// Probe the bare prefix, then every source extension in order.
fn resolve_source_file(
    ctx: &ResolutionContext<'_>,
    prefix: &Path,
    platform: Option<&str>,
    tried: &mut Vec<String>,
) -> Option<PathBuf> {
    if let Some(path) = probe_ext(ctx, prefix, "", tried) {
        return Some(path);
    }

    ctx.source_exts
        .iter()
        .find_map(|ext| resolve_source_file_for_all_exts(ctx, prefix, ext, platform, tried))
}

/// `.<platform>.<ext>`, then `.native.<ext>`, then `.<ext>`.
fn resolve_source_file_for_all_exts(
    ctx: &ResolutionContext<'_>,
    prefix: &Path,
    source_ext: &str,
    platform: Option<&str>,
    tried: &mut Vec<String>,
) -> Option<PathBuf> {
    if let Some(platform) = platform {
        if let Some(path) = probe_ext(ctx, prefix, &format!(".{platform}.{source_ext}"), tried) {
            return Some(path);
        }
    }

    if ctx.prefer_native_platform {
        if let Some(path) = probe_ext(ctx, prefix, &format!(".native.{source_ext}"), tried) {
            return Some(path);
        }
    }

    probe_ext(ctx, prefix, &format!(".{source_ext}"), tried)
}

/// Check `prefix + ext`; record `ext` as tried on a miss.
fn probe_ext(
    ctx: &ResolutionContext<'_>,
    prefix: &Path,
    ext: &str,
    tried: &mut Vec<String>,
) -> Option<PathBuf> {
    let mut candidate = prefix.as_os_str().to_owned();
    candidate.push(ext);
    let candidate = PathBuf::from(candidate);

    if (ctx.does_file_exist)(&candidate) {
        return Some(candidate);
    }

    tried.push(ext.to_string());
    None
}

/// Root of the package containing the origin module, or its directory when
/// there is no `package.json` above it.
fn origin_package_root(ctx: &ResolutionContext<'_>) -> PathBuf {
    let origin_dir = dirname(ctx.origin_module_path);
    origin_dir
        .ancestors()
        .find(|dir| (ctx.does_file_exist)(&dir.join("package.json")))
        .unwrap_or(origin_dir)
        .to_path_buf()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split a bare specifier into package name and optional subpath.
///
/// `lodash/fp` gives `("lodash", Some("fp"))`, `@scope/pkg/sub` gives
/// `("@scope/pkg", Some("sub"))`.
#[must_use]
pub fn parse_bare_specifier(spec: &str) -> (&str, Option<&str>) {
    // Scoped package: @scope/pkg or @scope/pkg/subpath
    if spec.starts_with('@') {
        let mut slash_count = 0;
        for (i, c) in spec.char_indices() {
            if c == '/' {
                slash_count += 1;
                if slash_count == 2 {
                    return (&spec[..i], Some(&spec[i + 1..]));
                }
            }
        }
        return (spec, None);
    }

    // Regular package: pkg or pkg/subpath
    match spec.find('/') {
        Some(pos) => (&spec[..pos], Some(&spec[pos + 1..])),
        None => (spec, None),
    }
}
