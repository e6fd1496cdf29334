//! Domain-level error types.

use thiserror::Error;

/// Domain errors - validation and lookup failures reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Post with id <{id}> not found.")]
    NotFound { id: u64 },

    /// A search narrowed the collection down to nothing.
    #[error("No posts found.")]
    NoPostsFound,

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unsupported fields: {}", .0.join(", "))]
    UnsupportedFields(Vec<String>),

    #[error("No supported fields. Supported: {}", .0.join(", "))]
    NoSupportedFields(Vec<String>),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Wrong datatype for <{field}>: expected {expected}")]
    WrongDatatype {
        field: String,
        expected: &'static str,
    },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("<{value}> already exists in {field}")]
    AlreadyExists { field: String, value: String },
}

impl DomainError {
    /// Whether the caller asked for something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. } | DomainError::NoPostsFound)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The backing document is missing, unreadable, unwritable or not a post array.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal error: {0}")]
    Internal(String),
}
