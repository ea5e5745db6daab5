use std::path::PathBuf;
use thiserror::Error;
use wayfind_core::FileCandidates;

/// Resolver failures that the dependency diagnostics do not classify.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error(
        "The package `{}` is invalid because it specifies a `main` module field that could not be resolved (`{}`). None of these files exist:\n  * `{file_candidates}`\n  * `{index_candidates}`",
        .package_json_path.display(),
        .main_prefix_path.display()
    )]
    InvalidPackage {
        package_json_path: PathBuf,
        main_prefix_path: PathBuf,
        file_candidates: FileCandidates,
        index_candidates: FileCandidates,
    },

    #[error(
        "While resolving module `{module_name}`, the module map found the package `{package_name}`, but the file `{path_in_module}` could not be found in it. None of these files exist:\n  * `{file_candidates}`\n  * `{dir_candidates}`"
    )]
    MissingFileInHastePackage {
        module_name: String,
        package_name: String,
        path_in_module: String,
        file_candidates: FileCandidates,
        dir_candidates: FileCandidates,
    },
}
