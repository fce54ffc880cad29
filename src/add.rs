//! Saving parsed-log text into history.
//!
//! Reads content from a file or stdin, applies the pre-save cleanup the
//! submission path always used (blank lines dropped), and records it in the
//! store. Duplicate submissions are reported, not re-saved.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::digest;
use crate::store::HistoryStore;

/// Run the add command: read input, normalize it, store it, report the
/// outcome with the full hash so it can be fed to `show`/`rename`/`delete`.
pub async fn run_add(
    config: &Config,
    file: Option<&Path>,
    records: u64,
    host: Option<&str>,
) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!("Reading log text from stdin; finish with Ctrl-D.");
            }
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            buf
        }
    };

    let content = strip_blank_lines(&raw);
    if content.is_empty() {
        println!("Nothing to save: input is empty.");
        return Ok(());
    }
    if records == 0 {
        println!("Nothing to save: no parsed records reported.");
        return Ok(());
    }

    let store = HistoryStore::open(config).await?;
    let hash = digest::sha256_hex(&content);
    let inserted = store.add(&content, records, host).await?;
    let entry = store.get(&hash).await?;
    store.close().await;

    if inserted {
        println!("Saved new history entry");
    } else {
        println!("Already in history (identical content)");
    }
    if let Some(entry) = entry {
        println!("  name:    {}", entry.name);
        println!("  created: {}", entry.created);
    }
    println!("  hash:    {}", hash);

    Ok(())
}

/// Drop lines that contain only whitespace; keep the rest verbatim. Lines
/// are split on `\n` alone, so a `\r` on a content line stays part of it.
fn strip_blank_lines(raw: &str) -> String {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
