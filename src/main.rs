//! # Log History CLI (`loghist`)
//!
//! The `loghist` binary is the command-line front end for the history
//! store. Every subcommand maps onto one store operation.
//!
//! ## Usage
//!
//! ```bash
//! loghist --config ./config/loghist.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `loghist init` | Create the SQLite database and the entries schema |
//! | `loghist add [FILE]` | Save log text from FILE or stdin into history |
//! | `loghist list` | List all entries, newest first |
//! | `loghist show <hash>` | Print an entry's stored content verbatim |
//! | `loghist rename <hash> <name>` | Change an entry's display name |
//! | `loghist delete <hash>` | Remove an entry (asks for confirmation) |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! loghist init --config ./config/loghist.toml
//!
//! # Save a parsed session of 12 transactions
//! loghist add session.txt --records 12 --host cache-01.example.com
//!
//! # Pipe parser output straight in
//! parse-access-logs access.log | loghist add --records 40
//!
//! # Inspect and manage history (hashes as printed by `list`)
//! loghist list
//! loghist show <hash>
//! loghist rename <hash> "Checkout latency spike"
//! loghist delete <hash> --yes
//! ```

mod add;
mod config;
mod db;
mod delete;
mod digest;
mod list;
mod migrate;
mod models;
mod rename;
mod show;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Log History CLI — a local-first, content-addressed store for parsed log
/// sessions.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/loghist.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "loghist",
    about = "Log History — a local-first, content-addressed store for parsed log sessions",
    version,
    long_about = "Log History keeps the text of parsed log sessions in a local SQLite \
    database, keyed by the SHA-256 hash of the content so identical submissions are \
    stored once. Entries can be listed newest first, printed back for re-parsing, \
    renamed, and deleted."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/loghist.toml`. The database path is read from
    /// this file.
    #[arg(long, global = true, default_value = "./config/loghist.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file, the `entries` table, and the
    /// creation-time index. Idempotent: rerunning it changes nothing.
    Init,

    /// Save log text into history.
    ///
    /// Reads from FILE, or from stdin when FILE is omitted. Blank lines are
    /// dropped before hashing. Resubmitting identical content reports the
    /// existing entry instead of storing a second copy.
    Add {
        /// Input file with the parsed log text. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// Number of records the parser reported for this text. Names the
        /// entry; 0 refuses to save.
        #[arg(long)]
        records: u64,

        /// Host the logs came from, appended to the default entry name.
        #[arg(long)]
        host: Option<String>,
    },

    /// List all history entries, newest first.
    List,

    /// Print an entry's stored content.
    ///
    /// The content is written to stdout exactly as stored, so it can be
    /// piped back into a parser.
    Show {
        /// Full content hash, as printed by `list`.
        hash: String,
    },

    /// Change an entry's display name.
    ///
    /// Only the name changes. An empty NAME cancels the rename.
    Rename {
        /// Full content hash, as printed by `list`.
        hash: String,

        /// The new display name.
        name: String,
    },

    /// Remove an entry from history.
    ///
    /// Asks for confirmation on a terminal; otherwise requires `--yes`.
    Delete {
        /// Full content hash, as printed by `list`.
        hash: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let store = store::HistoryStore::open(&cfg).await?;
            store.close().await;
            println!("History database initialized at {}", cfg.db.path.display());
        }
        Commands::Add {
            file,
            records,
            host,
        } => {
            add::run_add(&cfg, file.as_deref(), records, host.as_deref()).await?;
        }
        Commands::List => {
            list::run_list(&cfg).await?;
        }
        Commands::Show { hash } => {
            show::run_show(&cfg, &hash).await?;
        }
        Commands::Rename { hash, name } => {
            rename::run_rename(&cfg, &hash, &name).await?;
        }
        Commands::Delete { hash, yes } => {
            delete::run_delete(&cfg, &hash, yes).await?;
        }
    }

    Ok(())
}
