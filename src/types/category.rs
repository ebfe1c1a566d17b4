use serde::{Deserialize, Serialize};

/// A named grouping for bookmarks. Categories form a forest via `parent_id`;
/// children are derived by reverse lookup, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub parent_id: Option<String>,
}
