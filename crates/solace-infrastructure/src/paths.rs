//! Unified path management for solace configuration files.
//!
//! ```text
//! ~/.config/solace/            # Config directory
//! ├── catalog.toml             # Optional catalog override
//! └── secret.json              # API keys
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct SolacePaths;

impl SolacePaths {
    const APP_DIR: &'static str = "solace";

    /// Returns the solace configuration directory (e.g. `~/.config/solace/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the optional catalog override.
    pub fn catalog_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
