//! Lexical path helpers for moving specifiers between coordinate spaces.
//!
//! Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Whether a specifier is relative (`./x`, `../x`, `.`).
#[must_use]
pub fn is_relative_specifier(spec: &str) -> bool {
    spec.starts_with('.')
}

/// Whether a specifier is an absolute filesystem path.
#[must_use]
pub fn is_absolute_specifier(spec: &str) -> bool {
    // Unix absolute
    if spec.starts_with('/') {
        return true;
    }

    // Windows absolute: C:\, D:/
    let bytes = spec.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    // UNC path: \\server\share
    spec.starts_with("\\\\")
}

/// Collapse `.` and `..` components without consulting the filesystem.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

/// Directory of a file path (`/` for a file at the root).
#[must_use]
pub fn dirname(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}

/// `./`-prefixed, `/`-separated path from `from_dir` to `target`.
///
/// `target` may itself be relative to `from_dir`.
#[must_use]
pub fn relative_specifier(from_dir: &Path, target: &Path) -> String {
    let target = normalize(&from_dir.join(target));
    let from_dir = normalize(from_dir);
    let diff = pathdiff::diff_paths(&target, &from_dir).unwrap_or(target);

    let parts: Vec<_> = diff
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("./{}", parts.join("/"))
}

/// Rewrite a specifier relative to `module_path`'s directory into one
/// relative to the directory of `package_json`.
#[must_use]
pub fn module_to_package_relative(module_path: &Path, package_json: &Path, spec: &str) -> String {
    let target = dirname(module_path).join(spec);
    relative_specifier(dirname(package_json), &target)
}

/// Inverse of [`module_to_package_relative`].
#[must_use]
pub fn package_to_module_relative(module_path: &Path, package_json: &Path, spec: &str) -> String {
    let target = dirname(package_json).join(spec);
    relative_specifier(dirname(module_path), &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifier_kinds() {
        assert!(is_relative_specifier("./foo"));
        assert!(is_relative_specifier("../foo"));
        assert!(!is_relative_specifier("foo"));
        assert!(is_absolute_specifier("/abs/foo"));
        assert!(is_absolute_specifier("C:\\foo"));
        assert!(is_absolute_specifier("\\\\server\\share"));
        assert!(!is_absolute_specifier("lodash/fp"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_module_to_package_relative() {
        let module = Path::new("/app/src/bar.js");
        let package = Path::new("/app/package.json");
        assert_eq!(module_to_package_relative(module, package, "./foo"), "./src/foo");
        assert_eq!(module_to_package_relative(module, package, "../lib/x"), "./lib/x");
    }

    #[test]
    fn test_package_to_module_relative() {
        let module = Path::new("/app/src/bar.js");
        let package = Path::new("/app/package.json");
        assert_eq!(
            package_to_module_relative(module, package, "./src/foo.browser"),
            "./foo.browser"
        );
        assert_eq!(package_to_module_relative(module, package, "./lib/x"), "./../lib/x");
        assert_eq!(
            package_to_module_relative(module, package, "/app/src/abs.js"),
            "./abs.js"
        );
    }

    #[test]
    fn test_round_trip_within_package() {
        let package = Path::new("/app/package.json");
        let cases = [
            ("/app/index.js", "./src/foo"),
            ("/app/src/bar.js", "./foo"),
            ("/app/src/deep/nested/mod.js", "./sibling/thing.js"),
            ("/app/src/deep/nested/mod.js", "./x"),
        ];
        for (module, spec) in cases {
            let module = Path::new(module);
            let there = module_to_package_relative(module, package, spec);
            let back = package_to_module_relative(module, package, &there);
            assert_eq!(back, spec, "round trip of {spec} from {}", module.display());
        }
    }
}
