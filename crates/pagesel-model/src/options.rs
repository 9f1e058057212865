//! Configuration options for a browsing session.

use serde::{Deserialize, Serialize};

use crate::SelectionError;

/// Default number of items shown per page.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// How events that reference items off the current page are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IgnoredEventLogging {
    /// Drop them without a trace.
    Silent,
    /// Emit a `debug` event for each one.
    #[default]
    Debug,
}

/// Options fixed for the lifetime of a browsing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Items per page. Virtual positions are only meaningful while this
    /// stays constant, so it cannot change mid-session.
    pub page_size: u64,

    /// Reporting of toggles that name an item not on the current page.
    pub ignored_events: IgnoredEventLogging,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            ignored_events: IgnoredEventLogging::default(),
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_ignored_events(mut self, mode: IgnoredEventLogging) -> Self {
        self.ignored_events = mode;
        self
    }

    /// Check the options before a session is built from them.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.page_size == 0 {
            return Err(SelectionError::InvalidPageSize);
        }
        Ok(())
    }
}
