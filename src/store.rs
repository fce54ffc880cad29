//! The content-addressed history store.
//!
//! [`HistoryStore`] wraps a [`SqlitePool`] and translates every operation of
//! the history contract into SQL against the single `entries` table. Rows
//! are keyed by the SHA-256 digest of their content, so resubmitting the
//! same text never creates a second row.
//!
//! # Operations
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`open`](HistoryStore::open) | Connect and ensure the schema exists |
//! | [`add`](HistoryStore::add) | Insert new content, dedup by digest |
//! | [`list_all`](HistoryStore::list_all) | Every entry, newest first |
//! | [`get`](HistoryStore::get) | Point lookup by digest |
//! | [`update`](HistoryStore::update) | Full upsert of one entry |
//! | [`rename`](HistoryStore::rename) | Relabel an entry, nothing else |
//! | [`delete`](HistoryStore::delete) | Remove an entry if present |

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use crate::config::Config;
use crate::db;
use crate::digest;
use crate::migrate;
use crate::models::Entry;

/// Errors surfaced by store operations.
///
/// Three kinds cover every failure a caller can meaningfully react to: the
/// database cannot be opened at all, a read failed, or a write failed.
/// Duplicate adds, deletes of absent keys, and empty renames are normal
/// outcomes, never errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or its schema could not be created.
    #[error("history store unavailable: {0}")]
    Unavailable(String),

    /// A read transaction failed.
    #[error("history read failed: {0}")]
    Read(#[source] sqlx::Error),

    /// A write transaction failed.
    #[error("history write failed: {0}")]
    Write(#[source] sqlx::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// SQLite-backed store of parsed-log history entries.
///
/// Constructed once per session via [`open`](Self::open) and passed to
/// whatever drives it; every instance is independent, so tests open
/// throwaway stores on temp paths. No teardown is required, though
/// [`close`](Self::close) is available to flush the pool early.
#[derive(Debug)]
pub struct HistoryStore {
    pool: SqlitePool,
}

impl HistoryStore {
    /// Open the database at the configured path and ensure the schema
    /// exists. Idempotent: reopening an initialized database changes
    /// nothing. Fails with [`StoreError::Unavailable`] when the file cannot
    /// be opened or the schema cannot be created.
    pub async fn open(config: &Config) -> StoreResult<Self> {
        let pool = db::connect(config).await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Record `content` under its digest. Returns `true` when a new entry
    /// was created, `false` when the digest was already present; in that
    /// case the existing entry is left exactly as it was.
    ///
    /// The conflict clause makes the existence check and the insert one
    /// atomic statement: adds racing on the same content leave a single row
    /// and the losers resolve `false`.
    pub async fn add(
        &self,
        content: &str,
        record_count: u64,
        host: Option<&str>,
    ) -> StoreResult<bool> {
        let hash = digest::sha256_hex(content);
        let name = entry_label(record_count, host);
        let created = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO entries (hash, name, content, created)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(hash) DO NOTHING
            "#,
        )
        .bind(&hash)
        .bind(&name)
        .bind(content)
        .bind(&created)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Write)?;

        Ok(result.rows_affected() == 1)
    }

    /// Every persisted entry, newest `created` first.
    ///
    /// The order is a derived view recomputed on each call; rows close
    /// enough to share a `created` second keep scan order, which callers
    /// must not rely on. A full scan is fine at local history sizes.
    pub async fn list_all(&self) -> StoreResult<Vec<Entry>> {
        let rows = sqlx::query("SELECT hash, name, content, created FROM entries")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Read)?;

        let mut entries: Vec<Entry> = rows.iter().map(entry_from_row).collect();
        entries.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(entries)
    }

    /// Point lookup by digest. An unknown hash is `Ok(None)`, not an error.
    pub async fn get(&self, hash: &str) -> StoreResult<Option<Entry>> {
        let row = sqlx::query("SELECT hash, name, content, created FROM entries WHERE hash = ?")
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Read)?;

        Ok(row.as_ref().map(entry_from_row))
    }

    /// Full upsert of `entry` by its hash.
    ///
    /// Exists to persist renames; callers renaming must hand back `content`
    /// and `created` untouched. The storage layer writes whatever it is
    /// given and does not police that.
    pub async fn update(&self, entry: &Entry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO entries (hash, name, content, created)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(hash) DO UPDATE SET
                name = excluded.name,
                content = excluded.content,
                created = excluded.created
            "#,
        )
        .bind(&entry.hash)
        .bind(&entry.name)
        .bind(&entry.content)
        .bind(&entry.created)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Write)?;

        Ok(())
    }

    /// Relabel the entry with this hash. The stored name is the trimmed
    /// input. Returns the replaced name when the rename was applied. `None`
    /// means nothing happened: either the new name was whitespace-only (a
    /// cancel; the prior name survives) or no entry has this hash.
    /// `content`, `hash`, and `created` are never touched.
    pub async fn rename(&self, hash: &str, new_name: &str) -> StoreResult<Option<String>> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(None);
        }

        let mut entry = match self.get(hash).await? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let old_name = entry.name.clone();
        entry.name = new_name.to_string();
        self.update(&entry).await?;
        Ok(Some(old_name))
    }

    /// Remove the entry with this hash. Deleting an absent key resolves
    /// normally. Deletes unconditionally; any confirmation gate belongs to
    /// the caller.
    pub async fn delete(&self, hash: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM entries WHERE hash = ?")
            .bind(hash)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Write)?;

        Ok(())
    }

    /// Close the underlying pool. Optional; dropping the store at process
    /// exit is equally fine.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn entry_from_row(row: &SqliteRow) -> Entry {
    Entry {
        hash: row.get("hash"),
        name: row.get("name"),
        content: row.get("content"),
        created: row.get("created"),
    }
}

/// Default display label: `"{n}txs"`, with `"@{host}"` appended when the
/// submitting side knew a source host.
fn entry_label(record_count: u64, host: Option<&str>) -> String {
    match host {
        Some(host) if !host.is_empty() => format!("{}txs@{}", record_count, host),
        _ => format!("{}txs", record_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        Config {
            db: DbConfig {
                path: tmp.path().join("history.sqlite"),
            },
        }
    }

    async fn open_store() -> (TempDir, HistoryStore) {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::open(&test_config(&tmp)).await.unwrap();
        (tmp, store)
    }

    #[test]
    fn test_entry_label() {
        assert_eq!(entry_label(2, None), "2txs");
        assert_eq!(entry_label(12, Some("example.com")), "12txs@example.com");
        assert_eq!(entry_label(3, Some("")), "3txs");
    }

    #[tokio::test]
    async fn test_add_then_duplicate() {
        let (_tmp, store) = open_store().await;

        assert!(store.add("a\nb\n", 2, None).await.unwrap());
        assert!(!store.add("a\nb\n", 2, None).await.unwrap());

        let entries = store.list_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "2txs");
        assert_eq!(entries[0].content, "a\nb\n");
        assert_eq!(entries[0].hash, digest::sha256_hex("a\nb\n"));
    }

    #[tokio::test]
    async fn test_add_with_host_label() {
        let (_tmp, store) = open_store().await;

        store.add("a\nb\n", 2, Some("example.com")).await.unwrap();

        let entries = store.list_all().await.unwrap();
        assert_eq!(entries[0].name, "2txs@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_add_keeps_existing_entry() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        assert!(store.rename(&hash, "Report A").await.unwrap().is_some());

        // A duplicate with different metadata must not overwrite anything.
        assert!(!store.add("a\nb\n", 5, Some("other.host")).await.unwrap());

        let entry = store.get(&hash).await.unwrap().unwrap();
        assert_eq!(entry.name, "Report A");
    }

    #[tokio::test]
    async fn test_created_is_second_precision() {
        let (_tmp, store) = open_store().await;

        store.add("one line", 1, None).await.unwrap();

        let entries = store.list_all().await.unwrap();
        let created = &entries[0].created;
        assert_eq!(created.len(), 19);
        assert!(NaiveDateTime::parse_from_str(created, "%Y-%m-%dT%H:%M:%S").is_ok());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (_tmp, store) = open_store().await;

        // Upsert directly so each entry carries a chosen creation time.
        for (content, created) in [
            ("first", "2024-05-01T08:00:00"),
            ("third", "2024-05-03T08:00:00"),
            ("second", "2024-05-02T08:00:00"),
        ] {
            store
                .update(&Entry {
                    hash: digest::sha256_hex(content),
                    name: content.to_string(),
                    content: content.to_string(),
                    created: created.to_string(),
                })
                .await
                .unwrap();
        }

        let entries = store.list_all().await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_get_unknown_hash_is_absent() {
        let (_tmp, store) = open_store().await;
        let absent = store.get(&digest::sha256_hex("never added")).await.unwrap();
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_rename_changes_only_the_name() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        let before = store.get(&hash).await.unwrap().unwrap();

        let replaced = store.rename(&hash, "Report A").await.unwrap();
        assert_eq!(replaced.as_deref(), Some("2txs"));

        let after = store.get(&hash).await.unwrap().unwrap();
        assert_eq!(after.name, "Report A");
        assert_eq!(after.hash, before.hash);
        assert_eq!(after.content, before.content);
        assert_eq!(after.created, before.created);
    }

    #[tokio::test]
    async fn test_rename_whitespace_cancels() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        assert!(store.rename(&hash, "  ").await.unwrap().is_none());

        let entry = store.get(&hash).await.unwrap().unwrap();
        assert_eq!(entry.name, "2txs");
    }

    #[tokio::test]
    async fn test_rename_trims_the_stored_name() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        assert!(store.rename(&hash, "  Report A  ").await.unwrap().is_some());

        let entry = store.get(&hash).await.unwrap().unwrap();
        assert_eq!(entry.name, "Report A");
    }

    #[tokio::test]
    async fn test_rename_unknown_hash_is_noop() {
        let (_tmp, store) = open_store().await;
        let replaced = store
            .rename(&digest::sha256_hex("never added"), "Report A")
            .await
            .unwrap();
        assert!(replaced.is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rename_after_delete_reports_nothing() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        store.delete(&hash).await.unwrap();

        let replaced = store.rename(&hash, "Report A").await.unwrap();
        assert!(replaced.is_none());
        assert!(
            store.get(&hash).await.unwrap().is_none(),
            "rename must not resurrect a deleted entry"
        );
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let (_tmp, store) = open_store().await;
        let hash = digest::sha256_hex("a\nb\n");

        store.add("a\nb\n", 2, None).await.unwrap();
        store.delete(&hash).await.unwrap();

        assert!(store.get(&hash).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_hash_is_noop() {
        let (_tmp, store) = open_store().await;

        store.add("a\nb\n", 2, None).await.unwrap();
        store.delete(&digest::sha256_hex("never added")).await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_create_one_row() {
        let (_tmp, store) = open_store().await;
        let content = "x-request started\nx-request finished\n";

        let (a, b, c, d) = tokio::join!(
            store.add(content, 2, None),
            store.add(content, 2, None),
            store.add(content, 2, None),
            store.add(content, 2, None),
        );

        let created: usize = [a, b, c, d]
            .into_iter()
            .map(|r| r.unwrap() as usize)
            .sum();
        assert_eq!(created, 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reopen_preserves_entries() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);

        let store = HistoryStore::open(&config).await.unwrap();
        store.add("a\nb\n", 2, None).await.unwrap();
        store.close().await;

        // Second open against the same path is a plain handle acquisition.
        let store = HistoryStore::open(&config).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_fails_when_path_unusable() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = Config {
            db: DbConfig {
                path: blocker.join("history.sqlite"),
            },
        };

        let err = HistoryStore::open(&config).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
