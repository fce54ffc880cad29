//! # Log History
//!
//! A local-first, content-addressed history store for parsed log sessions.
//!
//! Log History keeps the text of parsed log sessions in a local SQLite
//! database, keyed by the SHA-256 hash of the content so identical
//! submissions are stored once. Entries can be listed newest first, printed
//! back for re-parsing, renamed, and deleted.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │    CLI      │──▶│ HistoryStore │──▶│   SQLite    │
//! │  (loghist)  │   │ hash + dedup │   │  `entries`  │
//! └─────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! The log text itself comes from an external parser; this crate never
//! interprets it, it only stores and returns it.
//!
//! ## Quick Start
//!
//! ```bash
//! loghist init                          # create the database
//! loghist add session.txt --records 12  # save a parsed session
//! loghist list                          # newest first, with hashes
//! loghist show <hash>                   # print stored content verbatim
//! loghist rename <hash> "Report A"      # relabel an entry
//! loghist delete <hash> --yes           # remove an entry
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | The stored [`Entry`](models::Entry) record |
//! | [`digest`] | SHA-256 content hashing |
//! | [`store`] | The content-addressed history store |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |

pub mod add;
pub mod config;
pub mod db;
pub mod delete;
pub mod digest;
pub mod list;
pub mod migrate;
pub mod models;
pub mod rename;
pub mod show;
pub mod store;
