// Linkstash repository layer
// Managers expose CRUD over the storage schema: categories, tags, bookmarks, summaries.

pub mod bookmark_manager;
pub mod category_manager;
pub mod summary_manager;
pub mod tag_manager;
