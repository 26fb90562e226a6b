mod catalog;
mod compare;
mod specs;

use clap::{Parser, Subcommand};
use transom_catalog::StorefrontClient;
use transom_core::{default_taxonomy, load_taxonomy, AppConfig, SpecCategory};

#[derive(Debug, Parser)]
#[command(name = "transom")]
#[command(about = "Marine dealership storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and print a summary line per listing
    Catalog {
        /// Only list one backend category (e.g., "Outboard Motors")
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of rows to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Compare products side by side in a spec table
    Compare {
        /// Product handles to compare (up to three)
        #[arg(required = true, num_args = 1..=transom_compare::SLOT_COUNT)]
        handles: Vec<String>,
    },
    /// Print every resolved spec value for one product
    Specs {
        /// Product handle (e.g., tohatsu-mfs25c-efi)
        handle: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = transom_core::load_app_config()?;
    let client = StorefrontClient::from_config(&config)?;

    match cli.command {
        Commands::Catalog { category, limit } => {
            catalog::run_catalog(&client, &config, category.as_deref(), limit).await
        }
        Commands::Compare { handles } => compare::run_compare(&client, &config, &handles).await,
        Commands::Specs { handle } => specs::run_specs(&client, &config, &handle).await,
    }
}

/// The comparison taxonomy: the configured override file when set, the
/// compiled-in default otherwise.
pub(crate) fn comparison_taxonomy(config: &AppConfig) -> anyhow::Result<Vec<SpecCategory>> {
    match &config.taxonomy_path {
        Some(path) => Ok(load_taxonomy(path)?),
        None => Ok(default_taxonomy()),
    }
}
