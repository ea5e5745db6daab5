use crate::diagnostics::UnableToResolveError;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error for failures the core passes through without interpreting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by [`ModuleResolution::resolve_dependency`].
///
/// [`ModuleResolution::resolve_dependency`]: crate::ModuleResolution::resolve_dependency
#[derive(Error, Debug)]
pub enum Error {
    /// The module could not be found; carries the rendered diagnostic.
    #[error(transparent)]
    UnableToResolve(#[from] UnableToResolveError),

    /// A resolver failure the core does not classify, passed through as-is.
    #[error(transparent)]
    Resolver(BoxError),

    /// The module/package cache failed outside of redirect rewriting.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A collaborator broke its contract (not a missing module).
    #[error("invalid resolution: {0}")]
    InvalidResolution(&'static str),
}

impl Error {
    /// Whether this is the user-facing "module not found" error.
    #[must_use]
    pub fn is_unable_to_resolve(&self) -> bool {
        matches!(self, Self::UnableToResolve(_))
    }
}

/// Failure of a module/package cache or package handle lookup.
///
/// This is the only error type the capability traits may return. Caches
/// that are lenient about missing entries simply never produce it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no module at {}", .0.display())]
    ModuleNotFound(PathBuf),

    #[error("no package at {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("invalid package at {}: {message}", .path.display())]
    InvalidPackage { path: PathBuf, message: String },
}
