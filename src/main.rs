// CLI binary is only available for native targets
#![cfg(feature = "native")]

mod cli;

use clap::{Parser, Subcommand};
use cli::commands::{cmd_browse, cmd_list, cmd_show};
use cli::render::OutputFormat;
use pokedex_browser::catalog::{CatalogBrowser, HttpCatalogSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version, about = "Browse and search the Pokémon catalog from PokeAPI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List Pokémon page by page
    List {
        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one Pokémon by exact name
    Show {
        /// Pokémon name (case-insensitive)
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Interactive browsing: scroll for more, search, clear
    Browse,

    /// Print the effective configuration
    Config {
        /// Write the configuration to this path instead
        #[arg(long)]
        init: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("pokedex v{}", env!("CARGO_PKG_VERSION"));

    let config = cli::load_config(cli.config.as_deref())?;

    if let Commands::Config { init } = &cli.command {
        return cli::cmd_config(&config, init.as_deref());
    }

    let source = HttpCatalogSource::builder(&config.api.user_agent, config.api.timeout())?;
    let browser = CatalogBrowser::new(Arc::new(source), config.api.endpoints())
        .with_scroll_threshold(config.scroll.threshold);
    let sprite_base = config.sprites.base_url.as_str();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Commands::List { pages, format } => {
                cmd_list(&browser, pages, format, sprite_base).await
            }
            Commands::Show { name, format } => {
                cmd_show(&browser, &name, format, sprite_base).await
            }
            Commands::Browse => cmd_browse(&browser, sprite_base).await,
            Commands::Config { .. } => Ok(()),
        }
    })
}
