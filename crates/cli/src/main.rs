//! Pehenava CLI - data checks and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate products.json and markets.json
//! pehenava check
//!
//! # List the men's ceremony collection
//! pehenava products --gender men --occasion Ceremony
//!
//! # List traditional markets with locator statistics
//! pehenava markets
//! ```
//!
//! # Commands
//!
//! - `check` - Load and validate the data directory
//! - `products` - Print the filtered catalog
//! - `markets` - Print traditional markets and statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "pehenava")]
#[command(author, version, about = "Pehenava CLI tools")]
struct Cli {
    /// Directory holding products.json and markets.json
    #[arg(long, global = true, env = "DATA_DIR", default_value = "crates/storefront/data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the data files
    Check,
    /// Print the catalog for a collection and occasion
    Products {
        /// Collection (`women`, `men`, `kids`); defaults to women
        #[arg(short, long)]
        gender: Option<String>,

        /// Occasion label, e.g. Wedding or Ceremony
        #[arg(short, long)]
        occasion: Option<String>,
    },
    /// Print traditional markets and statistics
    Markets,
}

fn main() {
    // Load .env before clap reads DATA_DIR
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Check => commands::check::run(&cli.data_dir, &mut out)?,
        Commands::Products { gender, occasion } => commands::products::run(
            &cli.data_dir,
            gender.as_deref(),
            occasion.as_deref(),
            &mut out,
        )?,
        Commands::Markets => {
            let today = chrono::Local::now().date_naive();
            commands::markets::run(&cli.data_dir, today, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
