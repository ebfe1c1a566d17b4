//! Bookmark Manager for Linkstash.
//!
//! Implements `BookmarkManagerTrait` — CRUD operations for bookmarks, their
//! tag assignments, and the related-bookmarks query, backed by SQLite via
//! `rusqlite`.

use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;
use crate::types::tag::Tag;

/// Default result cap for the related-bookmarks query.
pub const DEFAULT_RELATED_LIMIT: i64 = 5;

/// Trait defining bookmark management operations.
///
/// Lookups return `Ok(None)` for a missing id; only the API edge turns
/// that into a not-found response.
pub trait BookmarkManagerTrait {
    fn create_bookmark(
        &mut self,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        category_id: Option<&str>,
        tag_ids: &[String],
    ) -> Result<Bookmark, BookmarkError>;
    fn get_bookmark(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Full field replacement. The tag set is replaced only when `tag_ids`
    /// is `Some`; `Some(&[])` clears it, `None` leaves it untouched.
    fn update_bookmark(
        &mut self,
        id: &str,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        category_id: Option<&str>,
        tag_ids: Option<&[String]>,
    ) -> Result<Option<Bookmark>, BookmarkError>;
    fn delete_bookmark(&mut self, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Bookmarks sharing the source's category and at least one tag
    /// (each filter applies only when the source has that attribute).
    fn related_bookmarks(
        &self,
        id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Bookmark>, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
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

    /// Checks whether a category with the given ID exists.
    fn category_exists(&self, category_id: &str) -> Result<bool, BookmarkError> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM categories WHERE id = ?1",
                params![category_id],
                |row| row.get(0),
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Replaces the bookmark's tag set with the existing subset of `tag_ids`.
    /// Unknown tag ids are silently dropped by the `IN` filter.
    fn replace_tags(&self, bookmark_id: &str, tag_ids: &[String]) -> Result<(), BookmarkError> {
        self.conn
            .execute(
                "DELETE FROM bookmark_tags WHERE bookmark_id = ?1",
                params![bookmark_id],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let placeholders = vec!["?"; tag_ids.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO bookmark_tags (bookmark_id, tag_id) \
             SELECT ?, id FROM tags WHERE id IN ({})",
            placeholders
        );

        let mut args: Vec<&dyn ToSql> = Vec::with_capacity(tag_ids.len() + 1);
        args.push(&bookmark_id);
        for tag_id in tag_ids {
            args.push(tag_id);
        }

        self.conn
            .execute(&sql, &args[..])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Loads the tags assigned to a bookmark, ordered by name.
    fn load_tags(&self, bookmark_id: &str) -> Result<Vec<Tag>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.id, t.name FROM tags t \
                 JOIN bookmark_tags bt ON bt.tag_id = t.id \
                 WHERE bt.bookmark_id = ?1 ORDER BY t.name",
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![bookmark_id], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        Ok(tags)
    }

    /// Reads a single bookmark row into a struct (tags attached separately).
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            category_id: row.get(4)?,
            tags: Vec::new(),
            created_at: row.get(5)?,
        })
    }

    /// Attaches tag sets to a batch of bookmark rows.
    fn attach_tags(&self, mut bookmarks: Vec<Bookmark>) -> Result<Vec<Bookmark>, BookmarkError> {
        for bookmark in &mut bookmarks {
            bookmark.tags = self.load_tags(&bookmark.id)?;
        }
        Ok(bookmarks)
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Creates a new bookmark with its initial tag set. The supplied tag ids
    /// are resolved against existing tags; nonexistent ids are dropped.
    fn create_bookmark(
        &mut self,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        category_id: Option<&str>,
        tag_ids: &[String],
    ) -> Result<Bookmark, BookmarkError> {
        if let Some(cid) = category_id {
            if !self.category_exists(cid)? {
                return Err(BookmarkError::CategoryNotFound(cid.to_string()));
            }
        }

        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, url, title, description, category_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, url, title, description, category_id, now],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        self.replace_tags(&id, tag_ids)?;

        Ok(Bookmark {
            id: id.clone(),
            url: url.to_string(),
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            category_id: category_id.map(str::to_string),
            tags: self.load_tags(&id)?,
            created_at: now,
        })
    }

    /// Fetches a bookmark by ID with its tags. Missing id is `Ok(None)`.
    fn get_bookmark(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let row = match self.conn.query_row(
            "SELECT id, url, title, description, category_id, created_at \
             FROM bookmarks WHERE id = ?1",
            params![id],
            Self::row_to_bookmark,
        ) {
            Ok(bookmark) => bookmark,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(BookmarkError::DatabaseError(e.to_string())),
        };

        let mut bookmark = row;
        bookmark.tags = self.load_tags(&bookmark.id)?;
        Ok(Some(bookmark))
    }

    /// Lists all bookmarks with their tags, ordered by creation time.
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, description, category_id, created_at \
                 FROM bookmarks ORDER BY created_at, id",
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        self.attach_tags(results)
    }

    /// Replaces all scalar fields of an existing bookmark. Returns `Ok(None)`
    /// when the id is unknown. The tag set is replaced only when `tag_ids`
    /// is supplied; omitting it keeps the existing assignments.
    fn update_bookmark(
        &mut self,
        id: &str,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        category_id: Option<&str>,
        tag_ids: Option<&[String]>,
    ) -> Result<Option<Bookmark>, BookmarkError> {
        if let Some(cid) = category_id {
            if !self.category_exists(cid)? {
                return Err(BookmarkError::CategoryNotFound(cid.to_string()));
            }
        }

        let affected = self
            .conn
            .execute(
                "UPDATE bookmarks SET url = ?1, title = ?2, description = ?3, category_id = ?4 \
                 WHERE id = ?5",
                params![url, title, description, category_id, id],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Ok(None);
        }

        if let Some(ids) = tag_ids {
            self.replace_tags(id, ids)?;
        }

        self.get_bookmark(id)
    }

    /// Deletes a bookmark by ID, returning its prior state (tags included).
    ///
    /// Summaries belong to the bookmark, so they are removed in the same
    /// call, as are the tag-join rows. No database-level cascade is assumed.
    fn delete_bookmark(&mut self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let existing = match self.get_bookmark(id)? {
            Some(bookmark) => bookmark,
            None => return Ok(None),
        };

        self.conn
            .execute(
                "DELETE FROM bookmark_summaries WHERE bookmark_id = ?1",
                params![id],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        self.conn
            .execute(
                "DELETE FROM bookmark_tags WHERE bookmark_id = ?1",
                params![id],
            )
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        self.conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        Ok(Some(existing))
    }

    /// Finds bookmarks related to the given one: excludes the source, keeps
    /// the source's category when it has one, and requires at least one
    /// shared tag when the source has tags. Both filters apply conjunctively.
    /// A missing source yields an empty list, not an error.
    ///
    /// Inclusion is binary; there is no ranking by overlap. Results are
    /// ordered by creation time then id so the truncation is reproducible.
    fn related_bookmarks(
        &self,
        id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Bookmark>, BookmarkError> {
        let source = match self.get_bookmark(id)? {
            Some(bookmark) => bookmark,
            None => return Ok(Vec::new()),
        };

        let tag_ids: Vec<&String> = source.tags.iter().map(|t| &t.id).collect();
        let limit = limit.unwrap_or(DEFAULT_RELATED_LIMIT);

        let mut sql = String::from(
            "SELECT id, url, title, description, category_id, created_at \
             FROM bookmarks WHERE id != ?",
        );
        let mut args: Vec<&dyn ToSql> = vec![&source.id];

        if let Some(category_id) = &source.category_id {
            sql.push_str(" AND category_id = ?");
            args.push(category_id);
        }

        if !tag_ids.is_empty() {
            let placeholders = vec!["?"; tag_ids.len()].join(", ");
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM bookmark_tags bt \
                 WHERE bt.bookmark_id = bookmarks.id AND bt.tag_id IN ({}))",
                placeholders
            ));
            for tag_id in &tag_ids {
                args.push(*tag_id);
            }
        }

        sql.push_str(" ORDER BY created_at, id LIMIT ?");
        args.push(&limit);

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(&args[..], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| BookmarkError::DatabaseError(e.to_string()))?);
        }
        self.attach_tags(results)
    }
}
