//! Deleting a history entry, behind a confirmation gate.
//!
//! The gate lives here: an interactive prompt on a terminal, a required
//! `--yes` flag everywhere else. The storage layer itself deletes
//! unconditionally.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::store::HistoryStore;

/// Run the delete command: confirm, then remove one entry.
pub async fn run_delete(config: &Config, hash: &str, yes: bool) -> Result<()> {
    let store = HistoryStore::open(config).await?;

    let entry = match store.get(hash).await? {
        Some(entry) => entry,
        None => {
            store.close().await;
            println!("No history entry with hash {}, nothing deleted.", hash);
            return Ok(());
        }
    };

    if !yes {
        if !atty::is(atty::Stream::Stdin) {
            store.close().await;
            eprintln!("Error: refusing to delete without confirmation; pass --yes");
            std::process::exit(1);
        }
        if !confirm(&entry.name)? {
            store.close().await;
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    store.delete(hash).await?;
    store.close().await;

    println!("Deleted \"{}\" ({})", entry.name, hash);
    Ok(())
}

/// Ask on stderr, read one line from stdin. Only an explicit yes proceeds.
fn confirm(name: &str) -> Result<bool> {
    eprint!("Delete \"{}\" from history? [y/N] ", name);
    std::io::stderr().flush().context("Failed to flush stderr")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation from stdin")?;

    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
