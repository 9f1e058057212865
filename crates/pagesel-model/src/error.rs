//! Error types for the selection model.

use thiserror::Error;

use crate::ItemId;

/// Errors raised while validating selection input or page geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectionError {
    /// Baseline input was non-numeric or negative.
    #[error("invalid baseline '{input}': {reason}")]
    InvalidArgument {
        /// The rejected input, as the user supplied it.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An event referenced an item that is not on the current page.
    #[error("item {id} is not on the current page")]
    UnknownIdentifier {
        /// The identifier that could not be positioned.
        id: ItemId,
    },

    /// Item identifiers must be non-empty.
    #[error("invalid item identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// Page numbers are 1-based.
    #[error("page number must be at least 1")]
    InvalidPageNumber,

    /// The page's slots lie past the largest representable position.
    #[error("page {page_number} of size {page_size} is out of range")]
    PageOutOfRange {
        /// Requested 1-based page number.
        page_number: u64,
        /// Configured page size.
        page_size: u64,
    },

    /// A page carried more items than the page size allows.
    #[error("page holds {len} items but the page size is {page_size}")]
    PageOverflow {
        /// Number of items received.
        len: usize,
        /// Configured page size.
        page_size: u64,
    },
}

impl SelectionError {
    /// Build an `InvalidArgument` error for a rejected baseline input.
    pub fn invalid_baseline(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns a message suitable for a validation hint next to the input.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidArgument { .. } => "Enter a whole number of items, 0 or more.",
            Self::UnknownIdentifier { .. } => "That item is no longer on screen.",
            Self::InvalidIdentifier(_) => "Item identifiers cannot be blank.",
            Self::InvalidPageSize => "Page size must be at least 1.",
            Self::InvalidPageNumber => "Pages are numbered from 1.",
            Self::PageOutOfRange { .. } => "That page is past the end of any collection.",
            Self::PageOverflow { .. } => "The data source returned an oversized page.",
        }
    }
}

/// Result type for selection model operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
