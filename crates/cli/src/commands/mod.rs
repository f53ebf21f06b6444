//! CLI command implementations.

pub mod catalog;
pub mod simulate;

use std::path::{Path, PathBuf};

use toybox_core::{Catalog, CatalogError};

/// Environment variable shared with the storefront.
pub const CATALOG_PATH_VAR: &str = "STOREFRONT_CATALOG_PATH";

/// Load the catalog from an explicit path, the environment, or the built-in
/// product list, in that order.
///
/// # Errors
///
/// Returns an error if a catalog file is named but cannot be read or fails
/// validation.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    let from_env = std::env::var(CATALOG_PATH_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from);

    match path.map(Path::to_path_buf).or(from_env) {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog file");
            Catalog::load(&path)
        }
        None => Ok(Catalog::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = load_catalog(Some(Path::new("does/not/exist/catalog.json")));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
