//! Toybox CLI - catalog checks and scripted shop sessions.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in catalog
//! toybox catalog
//!
//! # Validate and list a catalog file
//! toybox catalog --path data/catalog.json
//!
//! # Replay a YAML event script against a fresh shop
//! toybox simulate scripts/happy-path.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog` - Load a catalog and list its products
//! - `simulate` - Run a scripted session and report every outcome and order
//!
//! When `--path`/`--catalog` is omitted, `STOREFRONT_CATALOG_PATH` is used if
//! set, otherwise the built-in catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "toybox")]
#[command(author, version, about = "Toybox CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a catalog and list its products
    Catalog {
        /// Catalog JSON file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Replay a YAML event script against a fresh shop
    Simulate {
        /// Script file containing a list of events
        script: PathBuf,

        /// Catalog JSON file
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "toybox_cli=info,toybox_core=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { path } => {
            let catalog = commands::load_catalog(path.as_deref())?;
            commands::catalog::list(&catalog);
        }
        Commands::Simulate { script, catalog } => {
            let catalog = commands::load_catalog(catalog.as_deref())?;
            let report = commands::simulate::run_file(&catalog, &script)?;
            report.log();
        }
    }
    Ok(())
}
