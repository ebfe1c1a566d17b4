//! Property-based tests for Tag Manager operations.
//!
//! These tests verify the unique-name invariant: a second tag with an
//! already-used name is always rejected, both at creation and at rename,
//! for arbitrary valid names.

use proptest::prelude::*;

use linkstash::database::Database;
use linkstash::managers::tag_manager::{TagManager, TagManagerTrait};
use linkstash::types::errors::TagError;

/// Strategy for generating non-empty tag names.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 _-]{0,20}"
}

// **Property: duplicate names are always rejected**
//
// *For any* valid name, creating a tag twice with that name SHALL fail the
// second time with a duplicate-name error, and the tag list SHALL still
// contain exactly one tag with that name.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn tag_duplicate_name_always_rejected(name in arb_name()) {
        let db = Database::open_in_memory()
            .expect("Failed to open in-memory database");
        let mut manager = TagManager::new(db.connection());

        manager
            .create_tag(&name)
            .expect("first create_tag should succeed");

        let err = manager
            .create_tag(&name)
            .expect_err("second create_tag with the same name must fail");
        prop_assert!(matches!(err, TagError::DuplicateName(_)));

        let matching = manager
            .list_tags()
            .expect("list_tags should succeed")
            .into_iter()
            .filter(|t| t.name == name)
            .count();
        prop_assert_eq!(matching, 1, "exactly one tag with the name must exist");
    }
}

// **Property: rename roundtrip**
//
// *For any* two distinct valid names, creating a tag under the first and
// renaming it to the second SHALL keep the id stable and make the new name
// visible on fetch.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn tag_rename_roundtrip(old_name in arb_name(), new_name in arb_name()) {
        prop_assume!(old_name != new_name);

        let db = Database::open_in_memory()
            .expect("Failed to open in-memory database");
        let mut manager = TagManager::new(db.connection());

        let created = manager
            .create_tag(&old_name)
            .expect("create_tag should succeed");

        let renamed = manager
            .update_tag(&created.id, &new_name)
            .expect("update_tag should succeed")
            .expect("existing tag must be updatable");
        prop_assert_eq!(&renamed.id, &created.id, "rename must not change the id");
        prop_assert_eq!(&renamed.name, &new_name);

        let fetched = manager
            .get_tag(&created.id)
            .expect("get_tag should succeed")
            .expect("renamed tag must still exist");
        prop_assert_eq!(fetched, renamed);
    }
}
