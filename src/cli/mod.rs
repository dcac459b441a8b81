use crate::config::Config;
use crate::registry::Table;
use crate::store::Store;
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// NESQL - browse and search exported game data
#[derive(Parser, Debug)]
#[command(name = "nesql-rust")]
#[command(version)]
#[command(about = "Browse and search exported game data", long_about = None)]
pub struct Cli {
    /// Configuration file (default: $NESQL_CONFIG_PATH or ~/.config/nesql/server.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

// CLI submodule declarations
pub mod search;
pub mod serve;
pub mod status;
pub mod tables;
pub mod view;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// List plugins and their tables
    Tables(TablesArgs),

    /// Search a table
    Search(SearchArgs),

    /// Show a single entity as JSON
    View(ViewArgs),

    /// Show row counts of the database
    Status,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen host (overrides config)
    #[arg(long)]
    pub host: Option<String>,
    /// Listen port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Output format: cli, json, md, csv
    #[arg(long, default_value = "cli")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Table path, e.g. `item` or `recipe`
    pub table: String,
    /// Filter as key=value; repeatable
    #[arg(short = 'f', long = "filter")]
    pub filters: Vec<String>,
    /// Page number
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,
    /// Output format: cli, json, md, csv
    #[arg(long, default_value = "cli")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Table path
    pub table: String,
    /// Entity id
    pub id: String,
}

/// Load the configuration named on the command line, or the default one
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Resolve a table path segment, listing the valid ones on failure
pub fn resolve_table(path: &str) -> Result<Table> {
    match Table::from_path(path) {
        Some(table) => Ok(table),
        None => {
            let known: Vec<&str> = Table::ALL.iter().map(|t| t.path()).collect();
            bail!("Unknown table '{}'. Known tables: {}", path, known.join(", "))
        }
    }
}

/// Open the configured database; it must already exist
pub fn open_store(config: &Config) -> Result<Store> {
    if !config.database.exists() {
        bail!("Database not found: {}", config.database.display());
    }
    Store::open(&config.database)
}
