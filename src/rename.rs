//! Renaming a history entry.
//!
//! Only the label changes; content, hash, and creation time stay as they
//! are. An empty name cancels instead of erasing the label.

use anyhow::Result;

use crate::config::Config;
use crate::store::HistoryStore;

/// Run the rename command: relabel one entry. The printed outcome comes
/// from what the store actually did, so a vanished entry is reported as a
/// no-op rather than a rename.
pub async fn run_rename(config: &Config, hash: &str, name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        println!("Empty name, rename cancelled.");
        return Ok(());
    }

    let store = HistoryStore::open(config).await?;
    let replaced = store.rename(hash, name).await?;
    store.close().await;

    match replaced {
        Some(old) => println!("Renamed \"{}\" to \"{}\"", old, trimmed),
        None => println!("No history entry with hash {}, nothing renamed.", hash),
    }

    Ok(())
}
