//! Core data model.
//!
//! A single record type flows through the store: the [`Entry`], one row per
//! distinct piece of submitted log content.

/// A recorded log session, keyed by the digest of its content.
#[derive(Debug, Clone)]
pub struct Entry {
    /// SHA-256 of the UTF-8 content as 64 lowercase hex chars; primary key.
    /// Never recomputed or reassigned after creation.
    pub hash: String,
    /// Display label. The only field a rename may touch.
    pub name: String,
    /// The raw submitted text, stored verbatim.
    pub content: String,
    /// Creation time, UTC, truncated to seconds (`YYYY-MM-DDTHH:MM:SS`).
    pub created: String,
}
