//! Printing a stored entry's content.
//!
//! The content goes to stdout with nothing added around it, so it can be
//! piped straight back into a log parser.

use anyhow::Result;

use crate::config::Config;
use crate::store::HistoryStore;

/// Run the show command: print the content of one entry.
pub async fn run_show(config: &Config, hash: &str) -> Result<()> {
    let store = HistoryStore::open(config).await?;
    let entry = store.get(hash).await?;
    store.close().await;

    match entry {
        Some(entry) => {
            println!("{}", entry.content);
            Ok(())
        }
        None => {
            eprintln!("Error: no history entry with hash {}", hash);
            std::process::exit(1);
        }
    }
}
