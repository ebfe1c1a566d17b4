use linkstash::types::errors::*;

// === CategoryError Tests ===

#[test]
fn category_error_display_variants() {
    assert_eq!(
        CategoryError::ParentNotFound("c-1".to_string()).to_string(),
        "Parent category not found: c-1"
    );
    assert_eq!(
        CategoryError::ParentCycle("c-2".to_string()).to_string(),
        "Category parent would create a cycle: c-2"
    );
    assert_eq!(
        CategoryError::DatabaseError("disk full".to_string()).to_string(),
        "Category database error: disk full"
    );
}

// === TagError Tests ===

#[test]
fn tag_error_display_variants() {
    assert_eq!(
        TagError::DuplicateName("rust".to_string()).to_string(),
        "Duplicate tag name: rust"
    );
    assert_eq!(
        TagError::DatabaseError("locked".to_string()).to_string(),
        "Tag database error: locked"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::CategoryNotFound("c-1".to_string()).to_string(),
        "Bookmark category not found: c-1"
    );
    assert_eq!(
        BookmarkError::DatabaseError("connection lost".to_string()).to_string(),
        "Bookmark database error: connection lost"
    );
}

// === SummaryError Tests ===

#[test]
fn summary_error_display_variants() {
    assert_eq!(
        SummaryError::BookmarkNotFound("bm-1".to_string()).to_string(),
        "Summary bookmark not found: bm-1"
    );
    assert_eq!(
        SummaryError::GatewayError("timeout".to_string()).to_string(),
        "Summary gateway error: timeout"
    );
    assert_eq!(
        SummaryError::DatabaseError("corrupt".to_string()).to_string(),
        "Summary database error: corrupt"
    );
}

// === LlmError Tests ===

#[test]
fn llm_error_display_variants() {
    assert_eq!(
        LlmError::NetworkError("connection refused".to_string()).to_string(),
        "LLM network error: connection refused"
    );
    assert_eq!(
        LlmError::BadStatus(503, "overloaded".to_string()).to_string(),
        "LLM endpoint returned status 503: overloaded"
    );
    assert_eq!(
        LlmError::MalformedResponse("missing choices".to_string()).to_string(),
        "Malformed LLM response: missing choices"
    );
}

// === Cross-cutting: all errors implement std::error::Error ===

#[test]
fn all_errors_implement_std_error() {
    // Verify each error type can be used as a trait object
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(CategoryError::ParentNotFound("id".to_string())),
        Box::new(TagError::DuplicateName("name".to_string())),
        Box::new(BookmarkError::DatabaseError("msg".to_string())),
        Box::new(SummaryError::GatewayError("msg".to_string())),
        Box::new(LlmError::NetworkError("msg".to_string())),
    ];

    assert_eq!(errors.len(), 5);

    // Each error should have a non-empty display string
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}

// === Debug trait verification ===

#[test]
fn all_errors_implement_debug() {
    let debug_str = format!("{:?}", CategoryError::ParentCycle("test".to_string()));
    assert!(debug_str.contains("ParentCycle"));

    let debug_str = format!("{:?}", TagError::DuplicateName("test".to_string()));
    assert!(debug_str.contains("DuplicateName"));

    let debug_str = format!("{:?}", LlmError::BadStatus(500, "err".to_string()));
    assert!(debug_str.contains("BadStatus"));
}
