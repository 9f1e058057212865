//! Selection model for collections that are only ever seen one page at a time.

pub mod error;
pub mod ids;
pub mod options;
pub mod page;
pub mod position;
pub mod selection;

pub use error::{Result, SelectionError};
pub use ids::ItemId;
pub use options::{DEFAULT_PAGE_SIZE, IgnoredEventLogging, SessionOptions};
pub use page::{PageContext, PageItem, PageRequest, PageResponse};
pub use position::{PageGeometry, PageWindow, total_pages, virtual_position};
pub use selection::{SelectionModel, parse_baseline};
