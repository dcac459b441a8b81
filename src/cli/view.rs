use crate::cli::{resolve_table, ViewArgs};
use crate::search::dispatch::view_table;
use crate::store::Store;
use anyhow::Result;

/// Handle view command - print one entity as JSON
pub fn handle(cmd: &ViewArgs, store: &Store) -> Result<()> {
    let table = resolve_table(&cmd.table)?;
    let view = view_table(store, table, &cmd.id)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
