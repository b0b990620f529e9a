use anyhow::{Context, Result};
use solace_infrastructure::CatalogStorage;
use std::path::Path;

use super::utils::load_catalog;

pub fn check(path: &Path) -> Result<()> {
    let catalog = CatalogStorage::load_file(path)
        .with_context(|| format!("Catalog {} is invalid", path.display()))?;

    println!("✅ {} is valid", path.display());
    println!("   crisis phrases:  {}", catalog.crisis.phrases.len());
    println!("   keywords:        {}", catalog.keywords.total_entries());
    println!("   history window:  {}", catalog.policy.history_window);
    Ok(())
}

pub fn show(path: Option<&Path>) -> Result<()> {
    let (catalog, source) = load_catalog(path)?;
    println!("# source: {source}");
    print!("{}", catalog.to_toml_string()?);
    Ok(())
}
