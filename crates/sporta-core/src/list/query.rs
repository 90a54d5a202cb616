//! List query state and the page-reset rule.

use std::collections::BTreeMap;

/// Filter value meaning "no filter" in every screen's dropdowns.
pub const ALL: &str = "All";

/// The query a list screen sends to its collection endpoint.
///
/// `page` is always at least 1 and `page_size` at least 1. Any change to
/// the search text or the filters moves `page` back to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    search: String,
    filters: BTreeMap<String, String>,
}

/// A single user edit to a [`ListQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryChange {
    /// The free-text search box changed.
    Search(String),
    /// A dropdown or date filter changed. `All` or an empty value clears it.
    Filter { key: String, value: String },
    /// A filter was removed.
    ClearFilter(String),
    /// The page changed (pagination control or prefetch).
    Page(u32),
}

impl QueryChange {
    /// Shorthand for [`QueryChange::Filter`].
    pub fn filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        QueryChange::Filter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true if this change moves the query back to page 1.
    pub fn resets_page(&self) -> bool {
        !matches!(self, QueryChange::Page(_))
    }
}

/// The page-reset rule.
///
/// Returns 1 after a search or filter change and `current_page` after a
/// change to the page alone.
pub fn reset_page(change: &QueryChange, current_page: u32) -> u32 {
    if change.resets_page() { 1 } else { current_page }
}

impl ListQuery {
    /// A query for the first page with no search or filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    /// Builder-style initial filter; does not count as a change.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !is_blank_filter(&value) {
            self.filters.insert(key.into(), value);
        }
        self
    }

    /// Builder-style initial search text; does not count as a change.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Builder-style starting page; pages start at 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Apply a change. Returns false if the query is unchanged.
    pub fn apply(&mut self, change: &QueryChange) -> bool {
        let changed = match change {
            QueryChange::Search(text) => {
                if self.search == *text {
                    false
                } else {
                    self.search.clone_from(text);
                    true
                }
            }
            QueryChange::Filter { key, value } if is_blank_filter(value) => {
                self.filters.remove(key).is_some()
            }
            QueryChange::Filter { key, value } => {
                if self.filters.get(key) == Some(value) {
                    false
                } else {
                    self.filters.insert(key.clone(), value.clone());
                    true
                }
            }
            QueryChange::ClearFilter(key) => self.filters.remove(key).is_some(),
            QueryChange::Page(page) => {
                let page = (*page).max(1);
                if self.page == page {
                    false
                } else {
                    self.page = page;
                    true
                }
            }
        };

        if changed {
            self.page = reset_page(change, self.page);
        }
        changed
    }

    /// Query-string parameters for the collection endpoint.
    ///
    /// The search text is trimmed and omitted when empty; blank and `All`
    /// filters never reach the query.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search".to_string(), search.to_string()));
        }

        params.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.trim().to_string())),
        );
        params
    }
}

fn is_blank_filter(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}
