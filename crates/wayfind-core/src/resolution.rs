//! Interface to the path-resolution algorithm: its outcome and failure
//! shapes.

use crate::context::ResolutionContext;
use crate::error::{BoxError, LookupError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome of a successful path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single source file.
    SourceFile(PathBuf),
    /// Every variant (density, platform) of an asset; never empty.
    AssetFiles(Vec<PathBuf>),
    /// The specifier was redirected to nothing.
    Empty,
}

/// What the resolver probed for a single file or directory hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCandidates {
    /// An asset name looked up through the asset resolver.
    Asset(String),
    /// A path prefix and the extensions appended to it, in trial order.
    SourceFile {
        file_path_prefix: PathBuf,
        candidate_exts: Vec<String>,
    },
}

impl fmt::Display for FileCandidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(name) => f.write_str(name),
            Self::SourceFile {
                file_path_prefix,
                candidate_exts,
            } => {
                let prefix = file_path_prefix.display();
                match candidate_exts.as_slice() {
                    [] => write!(f, "{prefix}"),
                    [ext] => write!(f, "{prefix}{ext}"),
                    exts => write!(f, "{prefix}({})", exts.join("|")),
                }
            }
        }
    }
}

/// Failure of the path-resolution algorithm.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A relative or absolute specifier matched no file and no directory.
    #[error("failed to resolve path")]
    FailedToResolvePath {
        file: Vec<FileCandidates>,
        dir: Vec<FileCandidates>,
    },

    /// A bare name was found neither in the module map nor in any
    /// `node_modules` directory.
    #[error("failed to resolve name")]
    FailedToResolveName {
        dir_paths: Vec<PathBuf>,
        extra_paths: Vec<PathBuf>,
    },

    /// Anything else.
    #[error(transparent)]
    Other(BoxError),
}

impl ResolveError {
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }
}

impl From<LookupError> for ResolveError {
    fn from(err: LookupError) -> Self {
        Self::other(err)
    }
}

/// The path-resolution algorithm, also used for custom resolver overrides.
pub trait PathResolver {
    fn resolve(
        &self,
        context: &ResolutionContext<'_>,
        module_name: &str,
        platform: Option<&str>,
    ) -> Result<Resolution, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_file_candidates() {
        let many = FileCandidates::SourceFile {
            file_path_prefix: PathBuf::from("/app/src/foo"),
            candidate_exts: vec![String::new(), ".ios.js".into(), ".js".into()],
        };
        assert_eq!(many.to_string(), "/app/src/foo(|.ios.js|.js)");

        let single = FileCandidates::SourceFile {
            file_path_prefix: PathBuf::from("/app/src/missing-module"),
            candidate_exts: vec![".js".into()],
        };
        assert_eq!(single.to_string(), "/app/src/missing-module.js");

        let none = FileCandidates::SourceFile {
            file_path_prefix: PathBuf::from("/app/src/index"),
            candidate_exts: vec![],
        };
        assert_eq!(none.to_string(), "/app/src/index");
    }

    #[test]
    fn test_format_asset_candidates() {
        let asset = FileCandidates::Asset("pic.png".into());
        assert_eq!(asset.to_string(), "pic.png");
    }

    #[test]
    fn test_other_keeps_message() {
        let err = ResolveError::from(LookupError::PackageNotFound(PathBuf::from(
            "/app/package.json",
        )));
        assert_eq!(err.to_string(), "no package at /app/package.json");
    }
}
