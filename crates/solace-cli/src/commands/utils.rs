use anyhow::{Context, Result};
use solace_core::{CompletionProvider, SupportCatalog};
use solace_infrastructure::{CatalogSource, CatalogStorage};
use solace_interaction::OpenAiCompletionProvider;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber honouring `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the catalog named on the command line, or the default one.
pub fn load_catalog(path: Option<&Path>) -> Result<(Arc<SupportCatalog>, CatalogSource)> {
    let loaded = match path {
        Some(path) => CatalogStorage::load_required(path),
        None => CatalogStorage::new().load(),
    };
    loaded.context("Failed to load support catalog")
}

/// Builds the OpenAI provider from secret.json or the environment.
pub fn remote_provider() -> solace_core::Result<Arc<dyn CompletionProvider>> {
    let provider = OpenAiCompletionProvider::try_from_env()?;
    tracing::debug!(model = provider.model(), "Using OpenAI provider");
    Ok(Arc::new(provider))
}
