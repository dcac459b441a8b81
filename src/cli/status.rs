use crate::store::Store;
use anyhow::Result;

/// Handle status command - show database row counts
pub fn handle(store: &Store) -> Result<()> {
    println!("NESQL Database Status");
    println!("{}", "=".repeat(50));

    if let Some(path) = store.path() {
        println!("\nDatabase: {}", path.display());
    }

    println!();
    for (table, count) in store.table_counts()? {
        println!("  {:<20} {}", table, count);
    }

    Ok(())
}
