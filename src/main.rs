mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::export::{ExportArgs, QuantityArg};
use mealweek::config::Config;
use mealweek::document::Format;
use mealweek_shared::Identity;

/// mealweek - Weekly meal plans and shopping lists
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Plan the meals of a week and export its shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Auth subject of the signed-in user (overrides config file)
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Show every week plan with its shopping list
    List,
    /// Save a new week plan read from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a stored week plan with the content of a JSON file
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a stored week plan
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Write the shopping list of a week plan to a file
    Export {
        #[arg(long)]
        id: String,
        /// Quantity of an ingredient, as INGREDIENT=QTY[:UNIT]
        #[arg(long = "qty")]
        quantities: Vec<QuantityArg>,
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Output directory (overrides config file)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealweek::observability::init_observability(
        "mealweek",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let identity = cli
        .owner
        .as_ref()
        .or(config.auth.subject.as_ref())
        .map(Identity::from_subject)
        .unwrap_or_else(Identity::anonymous);

    let result = match cli.command {
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::List => cli::week::list(config, identity).await,
        Commands::Create { file } => cli::week::create(config, identity, &file).await,
        Commands::Edit { id, file } => cli::week::edit(config, identity, &id, &file).await,
        Commands::Delete { id } => cli::week::delete(config, identity, &id).await,
        Commands::Export {
            id,
            quantities,
            format,
            out,
            title,
        } => {
            let args = ExportArgs {
                id,
                quantities,
                format,
                out,
                title,
            };

            cli::export::export(config, identity, args).await
        }
    };

    mealweek::observability::shutdown_observability();

    result
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    mealweek::db::migrate(&config.database.url).await
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: Config) -> Result<()> {
    tracing::info!("Resetting database...");

    mealweek::db::reset(&config.database.url).await
}
