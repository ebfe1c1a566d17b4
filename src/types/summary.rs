use serde::{Deserialize, Serialize};

/// Generated summary text for a bookmark. Summaries are append-only:
/// created by the LLM gateway, deleted individually, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkSummary {
    pub id: String,
    pub bookmark_id: String,
    pub summary: String,
    /// UNIX timestamp in seconds, assigned once at creation.
    pub created_at: i64,
}
