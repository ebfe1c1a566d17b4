use serde::{Deserialize, Serialize};

use crate::types::tag::Tag;

/// Represents a saved bookmark with its associated tags loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub tags: Vec<Tag>,
    /// UNIX timestamp in seconds, assigned once at creation.
    pub created_at: i64,
}
