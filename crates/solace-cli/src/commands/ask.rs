use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use solace_core::{ConversationMessage, SupportPipeline};
use solace_interaction::BoundaryTurn;
use std::fs;
use std::path::Path;

use super::utils::{load_catalog, remote_provider};

pub async fn run(
    catalog: Option<&Path>,
    message: &str,
    seed: Option<u64>,
    history: Option<&Path>,
    remote: bool,
) -> Result<()> {
    let (catalog, _) = load_catalog(catalog)?;
    let pipeline = SupportPipeline::new(catalog);
    let history = match history {
        Some(path) => read_history(path)?,
        None => Vec::new(),
    };

    let response = if pipeline.assess(message).is_crisis {
        pipeline.crisis_response()
    } else if remote {
        let provider = remote_provider()?;
        pipeline
            .respond_assisted(message, &history, provider.as_ref())
            .await?
    } else {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        pipeline.respond_with(message, &history, &mut rng)?
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_history(path: &Path) -> Result<Vec<ConversationMessage>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history from {}", path.display()))?;
    let turns: Vec<BoundaryTurn> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid history JSON in {}", path.display()))?;
    Ok(turns.into_iter().map(BoundaryTurn::into_message).collect())
}
