//! Category Manager for Linkstash.
//!
//! Implements `CategoryManagerTrait` — CRUD operations for the category tree,
//! backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::types::category::Category;
use crate::types::errors::CategoryError;

/// Trait defining category management operations.
///
/// Lookups return `Ok(None)` for a missing id; only the API edge turns
/// that into a not-found response.
pub trait CategoryManagerTrait {
    fn create_category(
        &mut self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Category, CategoryError>;
    fn get_category(&self, id: &str) -> Result<Option<Category>, CategoryError>;
    fn list_categories(&self) -> Result<Vec<Category>, CategoryError>;
    /// Children of `parent_id`, or root categories when `None`.
    fn list_children(&self, parent_id: Option<&str>) -> Result<Vec<Category>, CategoryError>;
    fn update_category(
        &mut self,
        id: &str,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Option<Category>, CategoryError>;
    fn delete_category(&mut self, id: &str) -> Result<Option<Category>, CategoryError>;
}

/// Category manager backed by a SQLite connection.
pub struct CategoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryManager<'a> {
    /// Creates a new `CategoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Checks whether a category with the given ID exists.
    fn category_exists(&self, id: &str) -> Result<bool, CategoryError> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM categories WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Walks the ancestor chain starting at `parent_id` and rejects the
    /// assignment if `id` appears in it. The walk is bounded by the number
    /// of categories, so a pre-existing corrupt cycle cannot loop forever.
    fn check_no_cycle(&self, id: &str, parent_id: &str) -> Result<(), CategoryError> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let mut current = Some(parent_id.to_string());
        let mut hops = 0i64;
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(CategoryError::ParentCycle(parent_id.to_string()));
            }
            hops += 1;
            if hops > total {
                break;
            }
            current = self
                .conn
                .query_row(
                    "SELECT parent_id FROM categories WHERE id = ?1",
                    params![ancestor],
                    |row| row.get(0),
                )
                .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;
        }
        Ok(())
    }

    /// Reads a single `Category` row into a struct.
    fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
            icon: row.get(3)?,
            parent_id: row.get(4)?,
        })
    }
}

impl<'a> CategoryManagerTrait for CategoryManager<'a> {
    /// Creates a new category. Returns the persisted entity with its generated ID.
    fn create_category(
        &mut self,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Category, CategoryError> {
        if let Some(pid) = parent_id {
            if !self.category_exists(pid)? {
                return Err(CategoryError::ParentNotFound(pid.to_string()));
            }
        }

        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO categories (id, name, color, icon, parent_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, name, color, icon, parent_id],
            )
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(Category {
            id,
            name: name.to_string(),
            color: color.map(str::to_string),
            icon: icon.map(str::to_string),
            parent_id: parent_id.map(str::to_string),
        })
    }

    /// Fetches a category by ID. Missing id is `Ok(None)`, never an error.
    fn get_category(&self, id: &str) -> Result<Option<Category>, CategoryError> {
        match self.conn.query_row(
            "SELECT id, name, color, icon, parent_id FROM categories WHERE id = ?1",
            params![id],
            Self::row_to_category,
        ) {
            Ok(category) => Ok(Some(category)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CategoryError::DatabaseError(e.to_string())),
        }
    }

    /// Lists all categories, ordered by name for stable output.
    fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, icon, parent_id FROM categories ORDER BY name, id")
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_category)
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| CategoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Lists direct children of the given category (or root categories for `None`).
    fn list_children(&self, parent_id: Option<&str>) -> Result<Vec<Category>, CategoryError> {
        let mut stmt = match parent_id {
            Some(_) => self.conn.prepare(
                "SELECT id, name, color, icon, parent_id FROM categories \
                 WHERE parent_id = ?1 ORDER BY name, id",
            ),
            None => self.conn.prepare(
                "SELECT id, name, color, icon, parent_id FROM categories \
                 WHERE parent_id IS NULL ORDER BY name, id",
            ),
        }
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let rows = match parent_id {
            Some(pid) => stmt.query_map(params![pid], Self::row_to_category),
            None => stmt.query_map([], Self::row_to_category),
        }
        .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| CategoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Replaces all fields of an existing category. Returns `Ok(None)` when
    /// the id is unknown. A supplied `parent_id` must exist and must not
    /// close a cycle through this category.
    fn update_category(
        &mut self,
        id: &str,
        name: &str,
        color: Option<&str>,
        icon: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Option<Category>, CategoryError> {
        if self.get_category(id)?.is_none() {
            return Ok(None);
        }

        if let Some(pid) = parent_id {
            if !self.category_exists(pid)? {
                return Err(CategoryError::ParentNotFound(pid.to_string()));
            }
            self.check_no_cycle(id, pid)?;
        }

        self.conn
            .execute(
                "UPDATE categories SET name = ?1, color = ?2, icon = ?3, parent_id = ?4 WHERE id = ?5",
                params![name, color, icon, parent_id, id],
            )
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        self.get_category(id)
    }

    /// Deletes a category by ID, returning its prior state.
    ///
    /// Bookmarks in the category become uncategorized and child categories
    /// move to the root, so no orphan references survive the delete.
    fn delete_category(&mut self, id: &str) -> Result<Option<Category>, CategoryError> {
        let existing = match self.get_category(id)? {
            Some(category) => category,
            None => return Ok(None),
        };

        self.conn
            .execute(
                "UPDATE bookmarks SET category_id = NULL WHERE category_id = ?1",
                params![id],
            )
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        self.conn
            .execute(
                "UPDATE categories SET parent_id = NULL WHERE parent_id = ?1",
                params![id],
            )
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;

        Ok(Some(existing))
    }
}
