//! Unit tests for the TagManager public API.
//!
//! These tests exercise tag CRUD and the unique-name invariant through the
//! `TagManagerTrait` interface, using an in-memory SQLite database.

use rstest::rstest;

use linkstash::database::Database;
use linkstash::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};
use linkstash::types::errors::TagError;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

#[rstest]
#[case("rust")]
#[case("web dev")]
#[case("read-later")]
#[case("日本語")]
fn test_create_then_get_roundtrip(#[case] name: &str) {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    let created = mgr.create_tag(name).unwrap();
    assert!(!created.id.is_empty());

    let fetched = mgr.get_tag(&created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, name);
}

#[test]
fn test_duplicate_name_rejected() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    mgr.create_tag("rust").unwrap();
    let err = mgr.create_tag("rust").unwrap_err();
    assert!(matches!(err, TagError::DuplicateName(name) if name == "rust"));
}

#[test]
fn test_rename_to_taken_name_rejected() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    mgr.create_tag("rust").unwrap();
    let other = mgr.create_tag("go").unwrap();

    let err = mgr.update_tag(&other.id, "rust").unwrap_err();
    assert!(matches!(err, TagError::DuplicateName(_)));
}

#[test]
fn test_update_missing_tag_returns_none() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());
    assert!(mgr.update_tag("no-such-id", "name").unwrap().is_none());
}

#[test]
fn test_rename_roundtrip() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    let tag = mgr.create_tag("old-name").unwrap();
    let renamed = mgr.update_tag(&tag.id, "new-name").unwrap().unwrap();
    assert_eq!(renamed.id, tag.id);
    assert_eq!(renamed.name, "new-name");
}

#[test]
fn test_list_tags_sorted_by_name() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    mgr.create_tag("zeta").unwrap();
    mgr.create_tag("alpha").unwrap();
    mgr.create_tag("midway").unwrap();

    let names: Vec<String> = mgr.list_tags().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["alpha", "midway", "zeta"]);
}

#[test]
fn test_delete_missing_tag_returns_none() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());
    assert!(mgr.delete_tag("no-such-id").unwrap().is_none());
}

#[test]
fn test_delete_returns_prior_state() {
    let db = setup();
    let mut mgr = TagManager::new(db.connection());

    let tag = mgr.create_tag("doomed").unwrap();
    let deleted = mgr.delete_tag(&tag.id).unwrap().unwrap();
    assert_eq!(deleted, tag);
    assert!(mgr.get_tag(&tag.id).unwrap().is_none());
}

/// Deleting a tag removes it from bookmarks that carried it.
#[test]
fn test_delete_detaches_tag_from_bookmarks() {
    let db = setup();
    let conn = db.connection();

    let tag = TagManager::new(conn).create_tag("shared").unwrap();
    let bm = BookmarkManager::new(conn)
        .create_bookmark("https://example.com", None, None, None, &[tag.id.clone()])
        .unwrap();
    assert_eq!(bm.tags.len(), 1);

    TagManager::new(conn).delete_tag(&tag.id).unwrap();

    let bm = BookmarkManager::new(conn).get_bookmark(&bm.id).unwrap().unwrap();
    assert!(bm.tags.is_empty(), "deleted tag should disappear from the bookmark");
}
