use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use nesql_rust::cli::{self, Cli, Commands};
use nesql_rust::search::SearchService;
use nesql_rust::server;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // The server logs through tracing; everything else through env_logger
    match &cli.command {
        Commands::Serve(_) => server::init_logging(),
        _ => env_logger::init(),
    }

    // Load configuration
    let config = cli::load_config(&cli).context("Failed to load configuration")?;
    info!("Database: {}", config.database.display());

    // Dispatch commands
    match &cli.command {
        Commands::Serve(cmd) => {
            cli::serve::handle(cmd, &config)?;
        }
        Commands::Tables(cmd) => {
            cli::tables::handle(cmd)?;
        }
        Commands::Search(cmd) => {
            let store = cli::open_store(&config)?;
            let service = SearchService::from_config(&config.search);
            cli::search::handle(cmd, &store, &service)?;
        }
        Commands::View(cmd) => {
            let store = cli::open_store(&config)?;
            cli::view::handle(cmd, &store)?;
        }
        Commands::Status => {
            let store = cli::open_store(&config)?;
            cli::status::handle(&store)?;
        }
    }

    Ok(())
}
