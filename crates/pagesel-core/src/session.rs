//! A browsing session: the page on screen, the page being fetched, and the
//! selection reconciled against them.
//!
//! Fetching is split in two steps so any event loop can drive it:
//! [`BrowsingSession::request_page`] records which page the user asked for,
//! and [`BrowsingSession::receive_page`] applies a response only if it still
//! answers the latest request. Until then the previous page stays current and
//! keeps serving selection events.

use pagesel_model::{
    IgnoredEventLogging, PageContext, PageItem, PageRequest, PageResponse, SelectionError,
    SelectionModel, SessionOptions, total_pages,
};
use tracing::{debug, info, warn};

use crate::provider::{PageProvider, ProviderError};
use crate::query::SelectionQuery;
use crate::reconciler::{EventOutcome, SelectionEvent, SelectionReconciler};

/// What happened to a page response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The response became the current page.
    Applied { items: usize, total_count: u64 },
    /// A newer request was made before this one resolved; dropped.
    Superseded { page_number: u64 },
    /// The fetch failed; an empty page is shown with the error.
    Failed(ProviderError),
}

#[derive(Debug, Clone)]
pub struct BrowsingSession {
    options: SessionOptions,
    reconciler: SelectionReconciler,
    page: PageContext,
    items: Vec<PageItem>,
    total_count: u64,
    pending: Option<PageRequest>,
    last_error: Option<ProviderError>,
}

impl BrowsingSession {
    /// Start a session on an empty first page with nothing selected.
    pub fn new(options: SessionOptions) -> Result<Self, SelectionError> {
        options.validate()?;
        let first = PageRequest::new(1, options.page_size)?;
        Ok(Self {
            options,
            reconciler: SelectionReconciler::new(),
            page: PageContext::empty(first),
            items: Vec::new(),
            total_count: 0,
            pending: None,
            last_error: None,
        })
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    /// Display items of the current page, in page order.
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Collection size reported by the last successful fetch.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_count, self.options.page_size)
    }

    pub fn pending(&self) -> Option<PageRequest> {
        self.pending
    }

    /// Error from the last fetch, cleared by the next applied page.
    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    pub fn model(&self) -> &SelectionModel {
        self.reconciler.model()
    }

    pub fn query(&self) -> SelectionQuery<'_> {
        SelectionQuery::new(self.reconciler.model(), &self.page)
    }

    /// Record that `page_number` is now the page the user wants.
    ///
    /// Any response still in flight for an earlier request will be dropped.
    pub fn request_page(&mut self, page_number: u64) -> Result<PageRequest, SelectionError> {
        let request = PageRequest::new(page_number, self.options.page_size)?;
        if let Some(previous) = self.pending.replace(request) {
            debug!(
                superseded = previous.page_number,
                requested = page_number,
                "page request superseded"
            );
        }
        Ok(request)
    }

    /// Apply the result of fetching `request`.
    ///
    /// Only a response to exactly the pending request is applied; anything
    /// else, including a request for the same page at another page size, is
    /// dropped as superseded.
    ///
    /// The selection model is never touched here, so a failed fetch loses no
    /// selections.
    pub fn receive_page(
        &mut self,
        request: PageRequest,
        result: Result<PageResponse, ProviderError>,
    ) -> PageOutcome {
        if self.pending != Some(request) {
            debug!(page_number = request.page_number, "dropping stale page response");
            return PageOutcome::Superseded {
                page_number: request.page_number,
            };
        }
        self.pending = None;

        let response = match result {
            Ok(response) => response,
            Err(error) => return self.fail_page(request, error),
        };
        let page = match PageContext::from_response(request, &response) {
            Ok(page) => page,
            Err(error) => {
                return self.fail_page(request, ProviderError::Decode(error.to_string()));
            }
        };

        let items = page.len();
        self.page = page;
        self.items = response.items;
        self.total_count = response.total_count;
        self.last_error = None;
        info!(
            page_number = request.page_number,
            items,
            total_count = self.total_count,
            "page applied"
        );
        PageOutcome::Applied {
            items,
            total_count: self.total_count,
        }
    }

    /// Request `page_number` and fetch it from `provider` in one step.
    pub fn load_page<P: PageProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        page_number: u64,
    ) -> Result<PageOutcome, SelectionError> {
        let request = self.request_page(page_number)?;
        let result = provider.fetch_page(request);
        Ok(self.receive_page(request, result))
    }

    /// Apply a selection event against the current page.
    ///
    /// Toggles for items that are not on the current page are ignored and
    /// reported as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidArgument`] for a negative baseline;
    /// the model is left unchanged.
    pub fn handle(&mut self, event: &SelectionEvent) -> Result<EventOutcome, SelectionError> {
        match self.reconciler.apply(&self.page, event) {
            Err(SelectionError::UnknownIdentifier { id }) => {
                if self.options.ignored_events == IgnoredEventLogging::Debug {
                    debug!(
                        %id,
                        page_number = self.page.page_number(),
                        "ignoring selection event for item off the current page"
                    );
                }
                Ok(EventOutcome::default())
            }
            other => other,
        }
    }

    fn fail_page(&mut self, request: PageRequest, error: ProviderError) -> PageOutcome {
        warn!(page_number = request.page_number, %error, "page fetch failed");
        self.page = PageContext::empty(request);
        self.items.clear();
        self.last_error = Some(error.clone());
        PageOutcome::Failed(error)
    }
}
