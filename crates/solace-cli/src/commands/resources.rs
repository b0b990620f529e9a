use anyhow::Result;
use std::path::Path;

use super::utils::load_catalog;

pub fn run(path: Option<&Path>) -> Result<()> {
    let (catalog, _) = load_catalog(path)?;
    let resources = &catalog.resources;

    println!("Crisis support resources");
    println!();
    for helpline in &resources.helplines {
        println!("  {} - {}", helpline.name, helpline.contact);
        println!("    {}", helpline.description);
    }
    println!();
    println!("If you are in immediate danger:");
    for step in &resources.emergency_guidance {
        println!("  • {step}");
    }
    println!();
    println!("{}", resources.closing_note);
    Ok(())
}
