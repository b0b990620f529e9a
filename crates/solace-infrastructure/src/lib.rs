//! File-backed configuration for solace: paths, catalog overrides and secrets.

pub mod catalog_storage;
pub mod paths;
pub mod secret_storage;

pub use catalog_storage::{CatalogSource, CatalogStorage};
pub use paths::{PathError, SolacePaths};
pub use secret_storage::{SecretStorage, SecretStorageError};
