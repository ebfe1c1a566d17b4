use serde::{Deserialize, Serialize};

/// A uniquely named label attachable to many bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}
