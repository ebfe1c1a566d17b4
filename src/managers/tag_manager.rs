//! Tag Manager for Linkstash.
//!
//! Implements `TagManagerTrait` — CRUD operations for tags, backed by SQLite
//! via `rusqlite`. Tag names are unique; the UNIQUE column constraint is the
//! enforcement point and violations map to `TagError::DuplicateName`.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::types::errors::TagError;
use crate::types::tag::Tag;

/// Trait defining tag management operations.
pub trait TagManagerTrait {
    fn create_tag(&mut self, name: &str) -> Result<Tag, TagError>;
    fn get_tag(&self, id: &str) -> Result<Option<Tag>, TagError>;
    fn list_tags(&self) -> Result<Vec<Tag>, TagError>;
    fn update_tag(&mut self, id: &str, name: &str) -> Result<Option<Tag>, TagError>;
    fn delete_tag(&mut self, id: &str) -> Result<Option<Tag>, TagError>;
}

/// Tag manager backed by a SQLite connection.
pub struct TagManager<'a> {
    conn: &'a Connection,
}

impl<'a> TagManager<'a> {
    /// Creates a new `TagManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Maps a write failure, translating UNIQUE violations on `name`.
    fn map_write_error(name: &str, e: rusqlite::Error) -> TagError {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                TagError::DuplicateName(name.to_string())
            }
            _ => TagError::DatabaseError(e.to_string()),
        }
    }

    /// Reads a single `Tag` row into a struct.
    fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl<'a> TagManagerTrait for TagManager<'a> {
    /// Creates a new tag. Fails with `DuplicateName` if the name is taken.
    fn create_tag(&mut self, name: &str) -> Result<Tag, TagError> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO tags (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
            .map_err(|e| Self::map_write_error(name, e))?;

        Ok(Tag {
            id,
            name: name.to_string(),
        })
    }

    /// Fetches a tag by ID. Missing id is `Ok(None)`, never an error.
    fn get_tag(&self, id: &str) -> Result<Option<Tag>, TagError> {
        match self.conn.query_row(
            "SELECT id, name FROM tags WHERE id = ?1",
            params![id],
            Self::row_to_tag,
        ) {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TagError::DatabaseError(e.to_string())),
        }
    }

    /// Lists all tags, ordered by name for stable output.
    fn list_tags(&self) -> Result<Vec<Tag>, TagError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY name")
            .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_tag)
            .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| TagError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Renames an existing tag. Returns `Ok(None)` when the id is unknown;
    /// renaming to a taken name fails with `DuplicateName`.
    fn update_tag(&mut self, id: &str, name: &str) -> Result<Option<Tag>, TagError> {
        let affected = self
            .conn
            .execute(
                "UPDATE tags SET name = ?1 WHERE id = ?2",
                params![name, id],
            )
            .map_err(|e| Self::map_write_error(name, e))?;

        if affected == 0 {
            return Ok(None);
        }
        self.get_tag(id)
    }

    /// Deletes a tag by ID, detaching it from all bookmarks first.
    /// Returns the deleted tag's prior state, or `Ok(None)` when absent.
    fn delete_tag(&mut self, id: &str) -> Result<Option<Tag>, TagError> {
        let existing = match self.get_tag(id)? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        self.conn
            .execute("DELETE FROM bookmark_tags WHERE tag_id = ?1", params![id])
            .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        self.conn
            .execute("DELETE FROM tags WHERE id = ?1", params![id])
            .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        Ok(Some(existing))
    }
}
