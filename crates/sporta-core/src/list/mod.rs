//! The paginated list protocol shared by every list screen.
//!
//! A [`ListController`] owns one screen's query and rendered rows. It is
//! assembled from small parts that are usable on their own:
//!
//! - [`Debouncer`]: when a query change should fetch
//! - [`RequestCanceller`]: at most one current request, stale ones aborted
//! - [`reset_page`]: search and filter edits go back to page 1
//! - [`Envelope::normalize`]: tolerant mapping of backend responses
//! - [`merge`]: de-duplicating page accumulation for infinite scroll
//! - [`PrefetchTrigger`]: edge-triggered sentinel prefetching

mod accumulator;
mod canceller;
mod controller;
mod debounce;
mod envelope;
mod options;
mod prefetch;
mod query;
mod window;

pub use accumulator::merge;
pub use canceller::{RequestCanceller, RequestToken};
pub use controller::{ListController, ListSnapshot};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use envelope::{Envelope, Normalized, total_pages};
pub use options::{CAROUSEL_PAGE_SIZE, ControllerOptions, SENTINEL_OFFSET};
pub use prefetch::{PrefetchDecision, PrefetchState, PrefetchTrigger, sentinel_index};
pub use query::{ALL, ListQuery, QueryChange, reset_page};
pub use window::{PageLink, page_window};

/// One decoded page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    /// Rows in server order.
    pub items: Vec<T>,
    pub total_pages: u32,
    pub page: u32,
}
