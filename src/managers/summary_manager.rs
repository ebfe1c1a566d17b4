//! Summary Manager for Linkstash.
//!
//! Implements `SummaryManagerTrait` — the append-only history of generated
//! bookmark summaries, backed by SQLite via `rusqlite`. Summaries are created
//! (normally by the LLM gateway flow) and deleted, never updated.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::errors::SummaryError;
use crate::types::summary::BookmarkSummary;

/// Trait defining summary management operations.
pub trait SummaryManagerTrait {
    fn create_summary(
        &mut self,
        bookmark_id: &str,
        summary: &str,
    ) -> Result<BookmarkSummary, SummaryError>;
    /// All summaries for a bookmark, newest first.
    fn list_summaries(&self, bookmark_id: &str) -> Result<Vec<BookmarkSummary>, SummaryError>;
    fn get_summary(&self, id: &str) -> Result<Option<BookmarkSummary>, SummaryError>;
    fn delete_summary(&mut self, id: &str) -> Result<Option<BookmarkSummary>, SummaryError>;
}

/// Summary manager backed by a SQLite connection.
pub struct SummaryManager<'a> {
    conn: &'a Connection,
}

impl<'a> SummaryManager<'a> {
    /// Creates a new `SummaryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Checks whether a bookmark with the given ID exists.
    fn bookmark_exists(&self, bookmark_id: &str) -> Result<bool, SummaryError> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE id = ?1",
                params![bookmark_id],
                |row| row.get(0),
            )
            .map_err(|e| SummaryError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Reads a single `BookmarkSummary` row into a struct.
    fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<BookmarkSummary> {
        Ok(BookmarkSummary {
            id: row.get(0)?,
            bookmark_id: row.get(1)?,
            summary: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl<'a> SummaryManagerTrait for SummaryManager<'a> {
    /// Persists a new summary for an existing bookmark.
    fn create_summary(
        &mut self,
        bookmark_id: &str,
        summary: &str,
    ) -> Result<BookmarkSummary, SummaryError> {
        if !self.bookmark_exists(bookmark_id)? {
            return Err(SummaryError::BookmarkNotFound(bookmark_id.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        self.conn
            .execute(
                "INSERT INTO bookmark_summaries (id, bookmark_id, summary, created_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, bookmark_id, summary, now],
            )
            .map_err(|e| SummaryError::DatabaseError(e.to_string()))?;

        Ok(BookmarkSummary {
            id,
            bookmark_id: bookmark_id.to_string(),
            summary: summary.to_string(),
            created_at: now,
        })
    }

    /// Lists a bookmark's summaries ordered newest first. Timestamps have
    /// second granularity, so rowid breaks ties by insertion order.
    fn list_summaries(&self, bookmark_id: &str) -> Result<Vec<BookmarkSummary>, SummaryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, bookmark_id, summary, created_at FROM bookmark_summaries \
                 WHERE bookmark_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| SummaryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![bookmark_id], Self::row_to_summary)
            .map_err(|e| SummaryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| SummaryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Fetches a summary by ID. Missing id is `Ok(None)`, never an error.
    fn get_summary(&self, id: &str) -> Result<Option<BookmarkSummary>, SummaryError> {
        match self.conn.query_row(
            "SELECT id, bookmark_id, summary, created_at FROM bookmark_summaries WHERE id = ?1",
            params![id],
            Self::row_to_summary,
        ) {
            Ok(summary) => Ok(Some(summary)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SummaryError::DatabaseError(e.to_string())),
        }
    }

    /// Deletes a summary by ID, returning its prior state.
    fn delete_summary(&mut self, id: &str) -> Result<Option<BookmarkSummary>, SummaryError> {
        let existing = match self.get_summary(id)? {
            Some(summary) => summary,
            None => return Ok(None),
        };

        self.conn
            .execute("DELETE FROM bookmark_summaries WHERE id = ?1", params![id])
            .map_err(|e| SummaryError::DatabaseError(e.to_string()))?;

        Ok(Some(existing))
    }
}
