//! Redirect (browser map) rewriting of specifiers.
//!
//! Packages declare redirects relative to their own root, while specifiers
//! are relative to the requesting module. Relative specifiers are moved into
//! the package's coordinate space for the lookup and the result is moved
//! back.

use crate::error::LookupError;
use crate::module::{Module, ModuleCache, Package, Redirect};
use crate::paths::{
    is_absolute_specifier, is_relative_specifier, module_to_package_relative,
    package_to_module_relative,
};
use std::path::Path;
use tracing::{debug, trace};

/// Effective specifier for `module_path` requested from `from_module`.
///
/// Returns the input unchanged when no package applies or the package has
/// no entry for it. A [`LookupError`] from the cache or the package is
/// treated the same way: some caches report missing entries as errors,
/// others as absent values, and both must mean "no redirect" here.
pub fn redirect_require<C: ModuleCache>(
    module_cache: &C,
    from_module: &C::Module,
    module_path: &str,
    main_fields: &[String],
) -> Redirect {
    match lookup_redirect(module_cache, from_module, module_path, main_fields) {
        Ok(Some(redirect)) => {
            trace!(
                from = %from_module.path().display(),
                spec = module_path,
                ?redirect,
                "redirected"
            );
            redirect
        }
        Ok(None) => Redirect::Path(module_path.to_string()),
        Err(err) => {
            // TODO: narrow this to not-found errors once package metadata
            // errors are reported separately by the caches.
            debug!(
                from = %from_module.path().display(),
                spec = module_path,
                error = %err,
                "redirect lookup failed, keeping specifier"
            );
            Redirect::Path(module_path.to_string())
        }
    }
}

fn lookup_redirect<C: ModuleCache>(
    module_cache: &C,
    from_module: &C::Module,
    module_path: &str,
    main_fields: &[String],
) -> Result<Option<Redirect>, LookupError> {
    if is_relative_specifier(module_path) {
        let Some(package) = from_module.get_package()? else {
            return Ok(None);
        };

        let package_relative =
            module_to_package_relative(from_module.path(), package.path(), module_path);
        let redirect = package.redirect_require(&package_relative, main_fields)?;

        return Ok(redirect.map(|redirect| match redirect {
            Redirect::Path(target) => Redirect::Path(package_to_module_relative(
                from_module.path(),
                package.path(),
                &target,
            )),
            Redirect::Empty => Redirect::Empty,
        }));
    }

    let package = if is_absolute_specifier(module_path) {
        module_cache
            .get_module(Path::new(module_path))?
            .get_package()?
    } else {
        from_module.get_package()?
    };

    match package {
        Some(package) => package.redirect_require(module_path, main_fields),
        None => Ok(None),
    }
}
