//! Catalog file storage.
//!
//! Resolves which support catalog a process runs with: an explicit file, the
//! user override at `~/.config/solace/catalog.toml`, or the bundled catalog.

use crate::paths::SolacePaths;
use solace_core::{Result, SolaceError, SupportCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the active catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Bundled => write!(f, "bundled catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads catalogs from TOML files.
pub struct CatalogStorage {
    override_path: Option<PathBuf>,
}

impl CatalogStorage {
    /// Storage that honours the user override file when it exists.
    pub fn new() -> Self {
        Self {
            override_path: SolacePaths::catalog_file().ok(),
        }
    }

    /// Storage with a custom override path (for tests and `--catalog`).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            override_path: Some(path),
        }
    }

    /// Reads and validates a catalog file.
    pub fn load_file(path: &Path) -> Result<SupportCatalog> {
        let content = fs::read_to_string(path).map_err(|e| {
            SolaceError::io(format!("Failed to read catalog at {}: {}", path.display(), e))
        })?;
        SupportCatalog::from_toml_str(&content).map_err(|e| match e {
            SolaceError::Serialization { format, message } => SolaceError::Serialization {
                format,
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })
    }

    /// Loads the active catalog.
    ///
    /// A missing override file falls back to the bundled catalog. An override
    /// file that exists but fails to parse or validate is an error.
    pub fn load(&self) -> Result<(Arc<SupportCatalog>, CatalogSource)> {
        if let Some(path) = &self.override_path {
            if path.exists() {
                let catalog = Self::load_file(path)?;
                tracing::info!(path = %path.display(), "Loaded catalog override");
                return Ok((Arc::new(catalog), CatalogSource::File(path.clone())));
            }
            tracing::debug!(path = %path.display(), "No catalog override, using bundled catalog");
        }

        Ok((SupportCatalog::bundled()?, CatalogSource::Bundled))
    }

    /// Loads a catalog from an explicitly requested file; the file must exist.
    pub fn load_required(path: &Path) -> Result<(Arc<SupportCatalog>, CatalogSource)> {
        let catalog = Self::load_file(path)?;
        Ok((Arc::new(catalog), CatalogSource::File(path.to_path_buf())))
    }
}

impl Default for CatalogStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_override_falls_back_to_bundled() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CatalogStorage::with_path(temp_dir.path().join("catalog.toml"));

        let (catalog, source) = storage.load().expect("Should load bundled catalog");

        assert_eq!(source, CatalogSource::Bundled);
        assert_eq!(catalog.crisis.actions.len(), 3);
    }

    #[test]
    fn test_override_file_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        let mut catalog = SupportCatalog::bundled().unwrap().as_ref().clone();
        catalog.crisis.phrases.push("can't go on".into());
        fs::write(&path, catalog.to_toml_string().unwrap()).unwrap();

        let (loaded, source) = CatalogStorage::with_path(path.clone()).load().unwrap();

        assert_eq!(source, CatalogSource::File(path));
        assert!(loaded.crisis.phrases.contains(&"can't go on".to_string()));
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        fs::write(&path, "[crisis]\nphrases = []\n").unwrap();

        let err = CatalogStorage::with_path(path).load().unwrap_err();
        assert!(err.is_serialization() || err.is_config());
    }

    #[test]
    fn test_required_file_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let err = CatalogStorage::load_required(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SolaceError::Io { .. }));
    }
}
