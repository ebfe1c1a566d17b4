use std::fmt;

// === CategoryError ===

/// Errors related to category management operations.
#[derive(Debug)]
pub enum CategoryError {
    /// The referenced parent category was not found.
    ParentNotFound(String),
    /// Assigning the parent would create a cycle in the category tree.
    ParentCycle(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::ParentNotFound(id) => write!(f, "Parent category not found: {}", id),
            CategoryError::ParentCycle(id) => {
                write!(f, "Category parent would create a cycle: {}", id)
            }
            CategoryError::DatabaseError(msg) => {
                write!(f, "Category database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CategoryError {}

// === TagError ===

/// Errors related to tag management operations.
#[derive(Debug)]
pub enum TagError {
    /// A tag with the same name already exists.
    DuplicateName(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::DuplicateName(name) => write!(f, "Duplicate tag name: {}", name),
            TagError::DatabaseError(msg) => write!(f, "Tag database error: {}", msg),
        }
    }
}

impl std::error::Error for TagError {}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// The referenced category was not found.
    CategoryNotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::CategoryNotFound(id) => {
                write!(f, "Bookmark category not found: {}", id)
            }
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === SummaryError ===

/// Errors related to bookmark summary operations.
#[derive(Debug)]
pub enum SummaryError {
    /// The owning bookmark was not found.
    BookmarkNotFound(String),
    /// The LLM gateway call failed; nothing was persisted.
    GatewayError(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryError::BookmarkNotFound(id) => {
                write!(f, "Summary bookmark not found: {}", id)
            }
            SummaryError::GatewayError(msg) => write!(f, "Summary gateway error: {}", msg),
            SummaryError::DatabaseError(msg) => {
                write!(f, "Summary database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SummaryError {}

// === LlmError ===

/// Errors related to the inference gateway.
#[derive(Debug)]
pub enum LlmError {
    /// Transport-level failure reaching the endpoint.
    NetworkError(String),
    /// The endpoint answered with a non-success status.
    BadStatus(u16, String),
    /// The response body did not have the expected chat-completion shape.
    MalformedResponse(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::NetworkError(msg) => write!(f, "LLM network error: {}", msg),
            LlmError::BadStatus(code, msg) => {
                write!(f, "LLM endpoint returned status {}: {}", code, msg)
            }
            LlmError::MalformedResponse(msg) => {
                write!(f, "Malformed LLM response: {}", msg)
            }
        }
    }
}

impl std::error::Error for LlmError {}
