use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use solace_application::{ConversationSession, SessionOptions};
use solace_core::SupportPipeline;
use solace_infrastructure::CatalogStorage;
use solace_interaction::OpenAiCompletionProvider;

mod display;
mod input;

use input::{COMMANDS, Input};

/// Interactive support chat.
#[derive(Parser)]
#[command(name = "solace-chat", long_about = None)]
struct Args {
    /// Seed for template selection
    #[arg(long)]
    seed: Option<u64>,
    /// Catalog file to use instead of ~/.config/solace/catalog.toml
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Use the OpenAI provider for non-crisis reply text
    #[arg(long)]
    remote: bool,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_session(args: &Args) -> Result<ConversationSession> {
    let (catalog, source) = match &args.catalog {
        Some(path) => CatalogStorage::load_required(path),
        None => CatalogStorage::new().load(),
    }
    .context("Failed to load support catalog")?;
    tracing::info!(%source, "Catalog loaded");

    let pipeline = SupportPipeline::new(catalog);
    let mut options = SessionOptions::default();
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }

    if args.remote {
        let provider = OpenAiCompletionProvider::try_from_env()
            .context("--remote needs an OpenAI API key")?;
        Ok(ConversationSession::with_provider(pipeline, Arc::new(provider), options))
    } else {
        Ok(ConversationSession::new(pipeline, options))
    }
}

/// The main entry point for the Solace chat REPL.
///
/// Each line is sent through a [`ConversationSession`]; numbered quick
/// replies can be picked by typing their number.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let session = build_session(&args)?;
    let catalog = session.pipeline().catalog().clone();

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Solace ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/coping' for coping tools, '/resources' for crisis lines, or 'quit' to exit."
            .bright_black()
    );
    println!();

    let mut offered: Vec<String> = Vec::new();
    if let Some(welcome) = session.history().await.into_iter().next() {
        display::print_assistant(&welcome);
        offered = welcome.suggested_actions;
    }

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => match input::parse(&line, &offered) {
                Input::Empty => continue,
                Input::Quit => {
                    println!("{}", "Take care of yourself. Goodbye!".bright_green());
                    break;
                }
                Input::Coping => display::print_coping(&catalog),
                Input::Resources => display::print_resources(&catalog),
                Input::History => display::print_history(&session.history().await),
                Input::Unknown(command) => {
                    println!("{}", format!("Unknown command: {command}").bright_black());
                }
                Input::Say(text) => {
                    let _ = rl.add_history_entry(line.as_str());
                    println!("{}", format!("> {}", text).green());

                    match session.send(&text).await {
                        Ok(Some(reply)) => {
                            display::print_assistant(&reply.message);
                            if reply.requires_crisis_support {
                                display::print_resources(&catalog);
                            }
                            offered = reply.message.suggested_actions;
                        }
                        Ok(None) => {}
                        Err(err) if err.is_retryable() => {
                            eprintln!("{}", format!("{err}. Please try again.").red());
                        }
                        Err(err) => {
                            eprintln!("{}", format!("Error: {err}").red());
                        }
                    }
                }
            },
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
