//! Unit tests for the related-bookmarks query.
//!
//! The query is a binary inclusion filter: exclude the source, keep the
//! source's category when it has one, require at least one shared tag when
//! it has tags, both conjunctively when both apply. No overlap ranking.

use linkstash::database::Database;
use linkstash::managers::bookmark_manager::{
    BookmarkManager, BookmarkManagerTrait, DEFAULT_RELATED_LIMIT,
};
use linkstash::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

#[test]
fn test_missing_source_returns_empty_not_error() {
    let db = setup();
    let mgr = BookmarkManager::new(db.connection());
    let related = mgr.related_bookmarks("no-such-id", None).unwrap();
    assert!(related.is_empty());
}

/// Source with category C and tag T1: only bookmarks in C sharing T1
/// qualify; the source itself is excluded.
#[test]
fn test_category_and_tag_filters_are_conjunctive() {
    let db = setup();
    let conn = db.connection();

    let cat = CategoryManager::new(conn)
        .create_category("C", None, None, None)
        .unwrap();
    let t1 = TagManager::new(conn).create_tag("T1").unwrap();
    let t2 = TagManager::new(conn).create_tag("T2").unwrap();

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark("https://source.example", None, None, Some(&cat.id), &[t1.id.clone()])
        .unwrap();

    // Same category, shares T1 — qualifies
    let hit = mgr
        .create_bookmark("https://hit.example", None, None, Some(&cat.id), &[t1.id.clone()])
        .unwrap();
    // Same category, different tag — filtered out
    mgr.create_bookmark("https://wrong-tag.example", None, None, Some(&cat.id), &[t2.id.clone()])
        .unwrap();
    // Shares T1 but uncategorized — filtered out
    mgr.create_bookmark("https://no-cat.example", None, None, None, &[t1.id.clone()])
        .unwrap();
    // Same category, no tags at all — filtered out
    mgr.create_bookmark("https://no-tags.example", None, None, Some(&cat.id), &[])
        .unwrap();

    let related = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, hit.id);
}

/// Sharing any one of the source's tags is enough (OR across tag ids).
#[test]
fn test_any_shared_tag_qualifies() {
    let db = setup();
    let conn = db.connection();

    let t1 = TagManager::new(conn).create_tag("T1").unwrap();
    let t2 = TagManager::new(conn).create_tag("T2").unwrap();

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark(
            "https://source.example",
            None,
            None,
            None,
            &[t1.id.clone(), t2.id.clone()],
        )
        .unwrap();
    let only_t2 = mgr
        .create_bookmark("https://partial.example", None, None, None, &[t2.id.clone()])
        .unwrap();

    let related = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, only_t2.id);
}

/// An untagged source in a category matches on category alone.
#[test]
fn test_untagged_source_filters_by_category_only() {
    let db = setup();
    let conn = db.connection();

    let cat = CategoryManager::new(conn)
        .create_category("C", None, None, None)
        .unwrap();
    let tag = TagManager::new(conn).create_tag("T").unwrap();

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark("https://source.example", None, None, Some(&cat.id), &[])
        .unwrap();
    let same_cat = mgr
        .create_bookmark("https://same-cat.example", None, None, Some(&cat.id), &[tag.id.clone()])
        .unwrap();
    mgr.create_bookmark("https://other.example", None, None, None, &[])
        .unwrap();

    let related = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, same_cat.id);
}

/// With neither category nor tags, every other bookmark is a candidate.
#[test]
fn test_bare_source_matches_all_others() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    let source = mgr
        .create_bookmark("https://source.example", None, None, None, &[])
        .unwrap();
    mgr.create_bookmark("https://a.example", None, None, None, &[])
        .unwrap();
    mgr.create_bookmark("https://b.example", None, None, None, &[])
        .unwrap();

    let related = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(related.len(), 2);
    assert!(related.iter().all(|b| b.id != source.id));
}

#[test]
fn test_limit_caps_results() {
    let db = setup();
    let conn = db.connection();

    let tag = TagManager::new(conn).create_tag("T").unwrap();
    let tags = vec![tag.id.clone()];

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark("https://source.example", None, None, None, &tags)
        .unwrap();
    for i in 0..8 {
        mgr.create_bookmark(&format!("https://b{}.example", i), None, None, None, &tags)
            .unwrap();
    }

    let capped = mgr.related_bookmarks(&source.id, Some(3)).unwrap();
    assert_eq!(capped.len(), 3);

    let default = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(default.len() as i64, DEFAULT_RELATED_LIMIT);
}

/// Ordering before truncation is deterministic, so repeated calls agree.
#[test]
fn test_results_are_reproducible() {
    let db = setup();
    let conn = db.connection();

    let tag = TagManager::new(conn).create_tag("T").unwrap();
    let tags = vec![tag.id.clone()];

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark("https://source.example", None, None, None, &tags)
        .unwrap();
    for i in 0..10 {
        mgr.create_bookmark(&format!("https://b{}.example", i), None, None, None, &tags)
            .unwrap();
    }

    let first = mgr.related_bookmarks(&source.id, Some(4)).unwrap();
    let second = mgr.related_bookmarks(&source.id, Some(4)).unwrap();
    assert_eq!(first, second);
}

/// Related results carry their own tag sets, like any other listing.
#[test]
fn test_related_results_include_tags() {
    let db = setup();
    let conn = db.connection();

    let tag = TagManager::new(conn).create_tag("T").unwrap();
    let tags = vec![tag.id.clone()];

    let mut mgr = BookmarkManager::new(conn);
    let source = mgr
        .create_bookmark("https://source.example", None, None, None, &tags)
        .unwrap();
    mgr.create_bookmark("https://other.example", None, None, None, &tags)
        .unwrap();

    let related = mgr.related_bookmarks(&source.id, None).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].tags.len(), 1);
    assert_eq!(related[0].tags[0].id, tag.id);
}
