#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Default path resolver for wayfind.
//!
//! Everything it knows about the filesystem comes through the
//! [`ResolutionContext`](wayfind_core::ResolutionContext) callbacks, so the
//! same algorithm runs against a real project or an in-memory fixture.

mod error;
mod resolve;

pub use error::ResolverError;
pub use resolve::{parse_bare_specifier, resolve, DefaultResolver};
