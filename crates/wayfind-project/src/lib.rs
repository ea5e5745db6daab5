#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Filesystem-backed collaborators for wayfind.
//!
//! Reads `package.json` files, the optional module map index and the
//! project's `wayfind.json`, and wires them into a
//! [`ModuleResolution`](wayfind_core::ModuleResolution) through
//! [`ProjectResolver`].

pub mod assets;
pub mod cache;
pub mod config;
pub mod error;
pub mod haste;
pub mod package;
pub mod project;

pub use assets::AssetType;
pub use cache::{ProjectModule, ProjectModuleCache};
pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use haste::HasteMap;
pub use package::ProjectPackage;
pub use project::ProjectResolver;
