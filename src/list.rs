//! Listing stored history entries.
//!
//! Prints every entry newest first, each with its full hash. The other
//! commands take those hashes as their key argument.

use anyhow::Result;

use crate::config::Config;
use crate::store::HistoryStore;

/// Run the list command: print all entries, newest first.
pub async fn run_list(config: &Config) -> Result<()> {
    let store = HistoryStore::open(config).await?;
    let entries = store.list_all().await?;
    store.close().await;

    if entries.is_empty() {
        println!("History is empty. Save parsed logs with `loghist add`.");
        return Ok(());
    }

    println!("History entries: {}", entries.len());
    println!();
    for (i, entry) in entries.iter().enumerate() {
        println!("[{}] {}", i + 1, entry.name);
        println!("    created: {}", entry.created);
        println!("    hash:    {}", entry.hash);
        println!();
    }

    Ok(())
}
