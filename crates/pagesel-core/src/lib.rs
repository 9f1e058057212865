//! Reconciliation of user selection intents against a paginated collection.

pub mod provider;
pub mod query;
pub mod reconciler;
pub mod session;

pub use provider::{PageProvider, ProviderError, VecProvider, decode_page};
pub use query::{RowSelection, SelectionQuery};
pub use reconciler::{EventOutcome, SelectionEvent, SelectionReconciler, Transition};
pub use session::{BrowsingSession, PageOutcome};
