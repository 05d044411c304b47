mod chat;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use fridgechef_core::{
    client_from_config, generate_recipe, summarize_recipe, AiConfig, HistoryEntry, HistoryStore,
    JsonFileStore, MemoryStore, Session,
};

#[derive(Parser)]
#[command(name = "fridgechef")]
#[command(about = "Generate recipes from whatever is in your fridge", long_about = None)]
struct Cli {
    /// Directory for persisted data (default: ~/.fridgechef)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat: enter ingredients, get recipes
    Chat,
    /// Generate a single recipe and exit
    Generate {
        /// Comma-separated ingredient names
        #[arg(long)]
        ingredients: String,
        /// Skip the follow-up summary call
        #[arg(long)]
        no_summary: bool,
    },
    /// List past ingredient submissions
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let history = make_store(&cli);

    match cli.command {
        Commands::Chat => {
            let session = make_session(history)?;
            chat::run(&session).await?;
        }
        Commands::Generate {
            ingredients,
            no_summary,
        } => {
            generate_once(history, &ingredients, no_summary).await?;
        }
        Commands::History => {
            render::print_history(history.as_ref())?;
        }
    }

    Ok(())
}

fn make_store(cli: &Cli) -> Arc<dyn HistoryStore> {
    if cli.ephemeral {
        return Arc::new(MemoryStore::new());
    }
    let path = match &cli.data_dir {
        Some(dir) => dir.join("history.json"),
        None => JsonFileStore::default_path(),
    };
    Arc::new(JsonFileStore::new(path))
}

fn make_session(history: Arc<dyn HistoryStore>) -> Result<Session> {
    let config = AiConfig::from_env()?;
    let ai = client_from_config(&config)?;
    Ok(Session::new(ai, history))
}

/// One-shot generation, mirroring what a single chat submission does.
async fn generate_once(
    history: Arc<dyn HistoryStore>,
    ingredients: &str,
    no_summary: bool,
) -> Result<()> {
    let config = AiConfig::from_env()?;
    let ai = client_from_config(&config)?;

    let result = generate_recipe(ai.as_ref(), ingredients).await?;

    let entry = HistoryEntry::new(ingredients, Some(result.recipe.recipe_name.clone()));
    if let Err(e) = history.append(entry) {
        tracing::warn!("Failed to persist history entry: {}", e);
    }

    render::print_recipe(&result.recipe);

    if !no_summary {
        match summarize_recipe(ai.as_ref(), &result.recipe).await {
            Ok(summary) => render::print_summary(&summary.summary),
            Err(e) => eprintln!("warning: could not summarize the recipe: {}", e),
        }
    }

    Ok(())
}
