//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::CategoryId;

/// Domain errors represent violations of the selection contract or of
/// catalog integrity. They never leave the controller in a changed state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown subcategory '{name}' in category {category}")]
    UnknownSubcategory { category: CategoryId, name: String },

    #[error("cannot {action}: no category is expanded")]
    NoExpandedCategory { action: &'static str },

    #[error("duplicate category id in catalog: {0}")]
    DuplicateCategoryId(CategoryId),

    #[error("duplicate category name in catalog: {0}")]
    DuplicateCategoryName(String),

    #[error("duplicate subcategory '{name}' in category {category}")]
    DuplicateSubcategory { category: CategoryId, name: String },

    #[error("invalid event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
