//! Fatal pipeline errors.
//!
//! Every variant names the file, route, page, key or placeholder that
//! stopped the build. Non-fatal asset failures are reported through
//! [`crate::asset::CompressReport`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build id not found at `{path}` (run `theu stamp` before `theu finish`)")]
    BuildIdMissing { path: PathBuf },

    #[error("build id file `{path}` is empty")]
    BuildIdInvalid { path: PathBuf },

    #[error("required input `{path}` not found")]
    InputMissing { path: PathBuf },

    #[error("IO error when reading `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("IO error when writing `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to remove `{0}`")]
    Remove(PathBuf, #[source] std::io::Error),

    #[error("metadata file `{0}` is not valid")]
    MetadataParse(PathBuf, #[source] serde_json::Error),

    #[error("route `{}` has no metadata entry `{page}`", display_route(.route))]
    MissingMetadata { route: String, page: String },

    #[error("metadata entry for route `{}` has no `{key}` value", display_route(.route))]
    MissingMetadataKey { route: String, key: String },

    #[error("template has no `{placeholder}` placeholder (route `{}`)", display_route(.route))]
    TemplateMismatch { route: String, placeholder: String },

    #[error("route `{0}` is not a valid relative path")]
    InvalidRoute(String),

    #[error("route `{}` is not configured", display_route(.0))]
    UnknownRoute(String),
}

/// Render the root route readably in messages.
fn display_route(route: &str) -> &str {
    if route.is_empty() { "/" } else { route }
}
