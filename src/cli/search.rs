use crate::cli::{resolve_table, SearchArgs};
use crate::formatter::Format;
use crate::search::dispatch::search_table;
use crate::search::{SearchParams, SearchService};
use crate::store::Store;
use anyhow::{Context, Result};

/// Handle search command - filtered, paginated table search
pub fn handle(cmd: &SearchArgs, store: &Store, service: &SearchService) -> Result<()> {
    let table = resolve_table(&cmd.table)?;
    let params = SearchParams::parse_cli(&cmd.filters)?;

    let result = search_table(store, service, table, cmd.page, &params)
        .with_context(|| format!("Search in {} failed", table))?;

    let formatter = Format::from_string(&cmd.format);
    print!("{}", formatter.format_page(table, &result)?);

    Ok(())
}
