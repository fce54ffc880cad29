//! Schema lifecycle.
//!
//! Every statement here is idempotent, so running the migration against an
//! already-initialized database is a no-op. [`HistoryStore::open`] runs it on
//! every open; a fresh database file gets its schema on first use.
//!
//! [`HistoryStore::open`]: crate::store::HistoryStore::open

use sqlx::SqlitePool;

use crate::store::{StoreError, StoreResult};

pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    // One row per distinct submitted content, keyed by its digest.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            hash    TEXT PRIMARY KEY,
            name    TEXT NOT NULL,
            content TEXT NOT NULL,
            created TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    // Non-unique, an access hint only; listing re-sorts in memory.
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_created ON entries(created)")
        .execute(pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    Ok(())
}
