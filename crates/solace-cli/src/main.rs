use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Solace CLI - supportive conversation assistant", long_about = None)]
struct Cli {
    /// Catalog file to use instead of ~/.config/solace/catalog.toml
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single utterance and print the response as JSON
    Ask {
        /// The user's message
        message: String,
        /// Seed for template selection
        #[arg(long)]
        seed: Option<u64>,
        /// JSON file with prior turns: [{"text": "...", "isUser": true}, ...]
        #[arg(long)]
        history: Option<PathBuf>,
        /// Use the OpenAI provider for non-crisis reply text
        #[arg(long)]
        remote: bool,
    },
    /// Read a chat request from stdin and write the endpoint reply to stdout
    Endpoint {
        /// Use the OpenAI provider for non-crisis reply text
        #[arg(long)]
        remote: bool,
    },
    /// Inspect support catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Print crisis helplines and emergency guidance
    Resources,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file
    Check {
        /// Path to the catalog TOML
        path: PathBuf,
    },
    /// Print the active catalog as TOML
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    commands::utils::init_tracing();
    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();

    match cli.command {
        Commands::Ask {
            message,
            seed,
            history,
            remote,
        } => commands::ask::run(catalog, &message, seed, history.as_deref(), remote).await?,
        Commands::Endpoint { remote } => commands::endpoint::run(catalog, remote).await?,
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(&path)?,
            CatalogAction::Show => commands::catalog::show(catalog)?,
        },
        Commands::Resources => commands::resources::run(catalog)?,
    }

    Ok(())
}
