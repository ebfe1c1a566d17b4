//! RPC method handler for the Linkstash JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! appropriate managers and services via the `App` struct.
//!
//! This is the only layer that turns a manager's `Ok(None)` into a
//! user-visible not-found error.

use std::sync::Mutex;

use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use crate::managers::summary_manager::{SummaryManager, SummaryManagerTrait};
use crate::managers::tag_manager::{TagManager, TagManagerTrait};
use crate::services::llm_gateway::{summarize_bookmark, LlmGatewayTrait};

use serde_json::{json, Value};

/// Extracts an optional string parameter.
fn opt_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

/// Extracts a required string parameter.
fn req_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    opt_str(params, key).ok_or_else(|| format!("missing {}", key))
}

/// Extracts an optional array of string ids. `None` means the key was absent,
/// which matters for `bookmark.update`: absent leaves the tag set alone,
/// `[]` clears it.
fn opt_id_list(params: &Value, key: &str) -> Option<Vec<String>> {
    params.get(key).and_then(|v| v.as_array()).map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    })
}

fn check_url(url: &str) -> Result<(), String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("invalid url: must start with http:// or https://".to_string());
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Health ───
        "ping" => Ok(json!({"pong": true})),
        "health.check" => Ok(json!({"status": "ok"})),

        // ─── LLM relay ───
        "llm.ask" => {
            let prompt = req_str(params, "prompt")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let text = a.llm.ask(prompt).map_err(|e| e.to_string())?;
            Ok(json!({"response": text}))
        }

        // ─── Categories ───
        "category.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = CategoryManager::new(a.db.connection());
            let categories = mgr.list_categories().map_err(|e| e.to_string())?;
            to_json(&categories)
        }
        "category.children" => {
            let parent = opt_str(params, "parent_id");
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = CategoryManager::new(a.db.connection());
            let children = mgr.list_children(parent).map_err(|e| e.to_string())?;
            to_json(&children)
        }
        "category.create" => {
            let name = req_str(params, "name")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = CategoryManager::new(a.db.connection());
            let category = mgr
                .create_category(
                    name,
                    opt_str(params, "color"),
                    opt_str(params, "icon"),
                    opt_str(params, "parent_id"),
                )
                .map_err(|e| e.to_string())?;
            to_json(&category)
        }
        "category.update" => {
            let id = req_str(params, "id")?;
            let name = req_str(params, "name")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = CategoryManager::new(a.db.connection());
            let updated = mgr
                .update_category(
                    id,
                    name,
                    opt_str(params, "color"),
                    opt_str(params, "icon"),
                    opt_str(params, "parent_id"),
                )
                .map_err(|e| e.to_string())?;
            match updated {
                Some(category) => to_json(&category),
                None => Err(format!("Category not found: {}", id)),
            }
        }
        "category.delete" => {
            let id = req_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = CategoryManager::new(a.db.connection());
            match mgr.delete_category(id).map_err(|e| e.to_string())? {
                Some(category) => to_json(&category),
                None => Err(format!("Category not found: {}", id)),
            }
        }

        // ─── Tags ───
        "tag.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = TagManager::new(a.db.connection());
            let tags = mgr.list_tags().map_err(|e| e.to_string())?;
            to_json(&tags)
        }
        "tag.create" => {
            let name = req_str(params, "name")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = TagManager::new(a.db.connection());
            let tag = mgr.create_tag(name).map_err(|e| e.to_string())?;
            to_json(&tag)
        }
        "tag.update" => {
            let id = req_str(params, "id")?;
            let name = req_str(params, "name")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = TagManager::new(a.db.connection());
            match mgr.update_tag(id, name).map_err(|e| e.to_string())? {
                Some(tag) => to_json(&tag),
                None => Err(format!("Tag not found: {}", id)),
            }
        }
        "tag.delete" => {
            let id = req_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = TagManager::new(a.db.connection());
            match mgr.delete_tag(id).map_err(|e| e.to_string())? {
                Some(tag) => to_json(&tag),
                None => Err(format!("Tag not found: {}", id)),
            }
        }

        // ─── Bookmarks ───
        "bookmark.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = BookmarkManager::new(a.db.connection());
            let bookmarks = mgr.list_bookmarks().map_err(|e| e.to_string())?;
            to_json(&bookmarks)
        }
        "bookmark.get" => {
            let id = req_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = BookmarkManager::new(a.db.connection());
            match mgr.get_bookmark(id).map_err(|e| e.to_string())? {
                Some(bookmark) => to_json(&bookmark),
                None => Err(format!("Bookmark not found: {}", id)),
            }
        }
        "bookmark.add" => {
            let url = req_str(params, "url")?;
            check_url(url)?;
            let tag_ids = opt_id_list(params, "tag_ids").unwrap_or_default();
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            let bookmark = mgr
                .create_bookmark(
                    url,
                    opt_str(params, "title"),
                    opt_str(params, "description"),
                    opt_str(params, "category_id"),
                    &tag_ids,
                )
                .map_err(|e| e.to_string())?;
            to_json(&bookmark)
        }
        "bookmark.update" => {
            let id = req_str(params, "id")?;
            let url = req_str(params, "url")?;
            check_url(url)?;
            let tag_ids = opt_id_list(params, "tag_ids");
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            let updated = mgr
                .update_bookmark(
                    id,
                    url,
                    opt_str(params, "title"),
                    opt_str(params, "description"),
                    opt_str(params, "category_id"),
                    tag_ids.as_deref(),
                )
                .map_err(|e| e.to_string())?;
            match updated {
                Some(bookmark) => to_json(&bookmark),
                None => Err(format!("Bookmark not found: {}", id)),
            }
        }
        "bookmark.delete" => {
            let id = req_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            match mgr.delete_bookmark(id).map_err(|e| e.to_string())? {
                Some(bookmark) => to_json(&bookmark),
                None => Err(format!("Bookmark not found: {}", id)),
            }
        }
        "bookmark.related" => {
            let id = req_str(params, "id")?;
            let limit = params.get("limit").and_then(|v| v.as_i64());
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = BookmarkManager::new(a.db.connection());
            let related = mgr.related_bookmarks(id, limit).map_err(|e| e.to_string())?;
            to_json(&related)
        }

        // ─── Summaries ───
        "summary.list" => {
            let bookmark_id = req_str(params, "bookmark_id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = SummaryManager::new(a.db.connection());
            let summaries = mgr.list_summaries(bookmark_id).map_err(|e| e.to_string())?;
            to_json(&summaries)
        }
        "summary.generate" => {
            let bookmark_id = req_str(params, "bookmark_id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let created = summarize_bookmark(&a.llm, a.db.connection(), bookmark_id)
                .map_err(|e| e.to_string())?;
            match created {
                Some(summary) => to_json(&summary),
                None => Err(format!("Bookmark not found: {}", bookmark_id)),
            }
        }
        "summary.delete" => {
            let id = req_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = SummaryManager::new(a.db.connection());
            match mgr.delete_summary(id).map_err(|e| e.to_string())? {
                Some(_) => Ok(json!({"ok": true})),
                None => Err(format!("Summary not found: {}", id)),
            }
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
