#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Dependency resolution core for wayfind.
//!
//! Given a requesting module and a requested specifier, picks exactly one
//! target module: a source file, one representative of a set of asset
//! variants, or the shared empty module. The path-resolution algorithm, the
//! module/package cache and the fast module map are collaborators reached
//! through the traits in [`module`] and [`resolution`].

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod module;
pub mod module_resolution;
pub mod options;
pub mod paths;
pub mod redirect;
pub mod resolution;

#[cfg(test)]
mod testing;

pub use context::ResolutionContext;
pub use diagnostics::UnableToResolveError;
pub use error::{BoxError, Error, LookupError};
pub use module::{Module, ModuleCache, ModuleMap, Package, Redirect};
pub use module_resolution::{ModuleResolution, EMPTY_MODULE};
pub use options::{AssetResolver, ModuleResolutionOptions, PathPredicate};
pub use resolution::{FileCandidates, PathResolver, Resolution, ResolveError};
