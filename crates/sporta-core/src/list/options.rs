//! Per-screen list controller settings.

use std::time::Duration;

use super::debounce::SEARCH_DEBOUNCE;

/// Rows per page of the venue carousel.
pub const CAROUSEL_PAGE_SIZE: u32 = 6;

/// Default sentinel distance from the end of the carousel.
pub const SENTINEL_OFFSET: usize = 2;

/// How a [`ListController`](super::ListController) renders pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Rows requested per page.
    pub page_size: u32,
    /// Quiet period for search edits.
    pub debounce: Duration,
    /// Append pages instead of replacing them.
    pub accumulate: bool,
    /// Request the next page when the sentinel becomes visible.
    pub prefetch: bool,
    /// Sentinel distance from the last rendered item.
    pub sentinel_offset: usize,
}

impl ControllerOptions {
    /// Infinite horizontal scroll of the public venue list.
    pub fn carousel() -> Self {
        Self {
            page_size: CAROUSEL_PAGE_SIZE,
            debounce: SEARCH_DEBOUNCE,
            accumulate: true,
            prefetch: true,
            sentinel_offset: SENTINEL_OFFSET,
        }
    }

    /// Numbered, page-at-a-time admin table.
    pub fn admin_table(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            debounce: SEARCH_DEBOUNCE,
            accumulate: false,
            prefetch: false,
            sentinel_offset: SENTINEL_OFFSET,
        }
    }
}
