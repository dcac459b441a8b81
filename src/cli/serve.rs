use crate::cli::ServeArgs;
use crate::config::Config;
use crate::server;
use anyhow::{bail, Result};

/// Handle serve command - run the HTTP server until interrupted
pub fn handle(cmd: &ServeArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = &cmd.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;

    if !config.database.exists() {
        bail!("Database not found: {}", config.database.display());
    }

    server::run_server(&config)
}
