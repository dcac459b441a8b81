use crate::cli::TablesArgs;
use crate::formatter::{plugin_listings, Format};
use anyhow::Result;

/// Handle tables command - list plugins and their tables
pub fn handle(cmd: &TablesArgs) -> Result<()> {
    let formatter = Format::from_string(&cmd.format);
    print!("{}", formatter.format_tables(&plugin_listings())?);
    Ok(())
}
