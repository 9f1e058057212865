//! The page data provider seam.
//!
//! The selection core never talks to the remote collection itself. A
//! [`PageProvider`] fetches one page at a time and reports failures as
//! [`ProviderError`]; the session decides what to do with the result.

use std::collections::BTreeSet;

use pagesel_model::{PageItem, PageRequest, PageResponse};
use thiserror::Error;

/// Failures while fetching or decoding a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The remote source could not be reached or refused the request.
    #[error("network error: {0}")]
    Network(String),

    /// The payload did not match the expected page shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not load this page. Check your connection and retry.",
            Self::Decode(_) => "The server sent data this page cannot display.",
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Fetches one page of the remote collection.
pub trait PageProvider {
    fn fetch_page(&mut self, request: PageRequest) -> Result<PageResponse, ProviderError>;
}

/// Decode a JSON page payload: `{"items": [{"id": ..., "fields": {...}}], "totalCount": n}`.
pub fn decode_page(bytes: &[u8]) -> Result<PageResponse, ProviderError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serves pages out of an in-memory item list.
///
/// Stands in for a remote source in tests and offline runs. Pages listed in
/// `failing_pages` answer with a network error.
#[derive(Debug, Clone, Default)]
pub struct VecProvider {
    items: Vec<PageItem>,
    failing_pages: BTreeSet<u64>,
    fetches: usize,
}

impl VecProvider {
    pub fn new(items: Vec<PageItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Items with ids `1..=count` and a single `label` field.
    pub fn numbered(count: u64) -> Self {
        let items = (1..=count)
            .map(|n| PageItem::new(n.into()).with_field("label", format!("Item {n}")))
            .collect();
        Self::new(items)
    }

    /// Decode a JSON array of items.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProviderError> {
        let items: Vec<PageItem> = serde_json::from_slice(bytes)?;
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn with_failing_pages(mut self, pages: impl IntoIterator<Item = u64>) -> Self {
        self.failing_pages.extend(pages);
        self
    }

    /// Number of fetches served so far, failures included.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn total_count(&self) -> u64 {
        self.items.len() as u64
    }
}

impl PageProvider for VecProvider {
    fn fetch_page(&mut self, request: PageRequest) -> Result<PageResponse, ProviderError> {
        self.fetches += 1;
        if self.failing_pages.contains(&request.page_number) {
            return Err(ProviderError::Network(format!(
                "page {} unavailable",
                request.page_number
            )));
        }
        let start = request.geometry().first_position();
        let items = usize::try_from(start)
            .ok()
            .and_then(|start| self.items.get(start..))
            .unwrap_or_default()
            .iter()
            .take(usize::try_from(request.page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PageResponse {
            items,
            total_count: self.total_count(),
        })
    }
}
