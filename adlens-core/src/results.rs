//! Keyword Results View model: page, search, sort and what to show.
//!
//! The browser owns only the user-driven query state. The fetched page lives
//! in the fetch cache under the key returned by [`KeywordBrowser::query`],
//! and [`KeywordBrowser::view`] combines the two.

use std::time::Instant;

use crate::config::LayoutConfig;
use crate::domain::{Keyword, KeywordPage};
use crate::fetch::FetchState;
use crate::query::pagination::clamp_page;
use crate::query::{
    Debouncer, KeywordQuery, Pagination, QueryKey, SearchTerm, SortField, SortState,
};
use crate::selection::ResultsScope;

pub const DISABLED_PROMPT: &str = "Select an ad group and date range to view keywords";
pub const LOAD_ERROR: &str = "Error loading keywords";

/// Why a loaded (or unloadable) page has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    SearchTooShort,
    NoSearchMatches,
    NoData,
}

impl EmptyReason {
    pub fn message(self) -> &'static str {
        match self {
            EmptyReason::SearchTooShort => "Please type at least 2 characters to search.",
            EmptyReason::NoSearchMatches => "No keywords match your search.",
            EmptyReason::NoData => "There is no keyword data for the selected date range.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Disabled,
    Loading,
    Failed,
    Empty(EmptyReason),
    Rows {
        keywords: Vec<Keyword>,
        pagination: Pagination,
    },
}

#[derive(Debug, Clone)]
pub struct KeywordBrowser {
    page: u32,
    page_size: u32,
    search_and_sort: bool,
    search: Debouncer,
    sort: SortState,
    scope: Option<ResultsScope>,
    disabled: bool,
}

impl KeywordBrowser {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            page: 1,
            page_size: layout.page_size,
            search_and_sort: layout.search_and_sort,
            search: Debouncer::default(),
            sort: SortState::Unsorted,
            scope: None,
            disabled: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn search_and_sort(&self) -> bool {
        self.search_and_sort
    }

    /// Text in the search box, including keystrokes not yet applied.
    pub fn search_text(&self) -> &str {
        self.search.raw()
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled && self.scope.is_some()
    }

    /// External override that blanks the view regardless of scope.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Adopt the selection's results scope. A different scope returns to page 1.
    pub fn set_scope(&mut self, scope: Option<ResultsScope>) -> bool {
        if self.scope == scope {
            return false;
        }
        self.scope = scope;
        self.page = 1;
        true
    }

    pub fn search_term(&self) -> SearchTerm {
        if self.search_and_sort {
            SearchTerm::classify(self.search.applied())
        } else {
            SearchTerm::None
        }
    }

    /// The request the view currently depends on, if any.
    ///
    /// `None` when disabled, out of scope, or the applied search is too short.
    pub fn query(&self) -> Option<KeywordQuery> {
        if self.disabled {
            return None;
        }
        let scope = self.scope?;
        let search = match self.search_term() {
            SearchTerm::TooShort => return None,
            SearchTerm::None => None,
            SearchTerm::Filter(s) => Some(s),
        };
        let mut query = KeywordQuery::new(scope.ad_group, scope.start, scope.end, self.page_size);
        query.page = self.page;
        query.search = search;
        query.sort = self.sort;
        Some(query)
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.query().map(QueryKey::Keywords)
    }

    /// Advance the sort FSM for a column header. Returns to page 1.
    pub fn toggle_sort(&mut self, field: SortField) -> bool {
        if !self.search_and_sort {
            return false;
        }
        self.sort = self.sort.toggle(field);
        self.page = 1;
        true
    }

    pub fn next_page(&mut self, total: u64) -> bool {
        let pagination = Pagination::new(self.page, self.page_size, total);
        if !pagination.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn search_push(&mut self, c: char, now: Instant) {
        if self.search_and_sort {
            self.search.push(c, now);
        }
    }

    pub fn search_pop(&mut self, now: Instant) {
        if self.search_and_sort {
            self.search.pop(now);
        }
    }

    /// Drop the search text at once, skipping the debounce window.
    ///
    /// Returns `true` when an applied term was removed, which returns to page 1.
    pub fn search_clear(&mut self) -> bool {
        let had_applied = !self.search.applied().is_empty();
        self.search.clear();
        if had_applied {
            self.page = 1;
        }
        had_applied
    }

    /// Promote debounced search text. A newly applied term returns to page 1.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.search.poll(now) {
            return false;
        }
        self.page = 1;
        true
    }

    /// Clamp the page after the server reports `total`.
    ///
    /// Returns `true` when the page moved, which changes [`Self::query`] and
    /// so triggers a refetch.
    pub fn reconcile_total(&mut self, total: u64) -> bool {
        let pages = Pagination::new(self.page, self.page_size, total).total_pages();
        let clamped = clamp_page(self.page, pages);
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// What to draw, given the cache entry for [`Self::key`].
    ///
    /// Empty reasons are checked as: search too short, then no rows for a
    /// search, then no rows at all.
    pub fn view(&self, state: Option<&FetchState<KeywordPage>>) -> ResultsView {
        if !self.is_enabled() {
            return ResultsView::Disabled;
        }
        let term = self.search_term();
        if term == SearchTerm::TooShort {
            return ResultsView::Empty(EmptyReason::SearchTooShort);
        }
        match state {
            None | Some(FetchState::Loading) => ResultsView::Loading,
            Some(FetchState::Failed(_)) => ResultsView::Failed,
            Some(FetchState::Ready(page)) => {
                if page.keywords.is_empty() && term.as_filter().is_some() {
                    ResultsView::Empty(EmptyReason::NoSearchMatches)
                } else if page.total == 0 {
                    ResultsView::Empty(EmptyReason::NoData)
                } else {
                    ResultsView::Rows {
                        keywords: page.keywords.clone(),
                        pagination: Pagination::new(self.page, self.page_size, page.total),
                    }
                }
            }
        }
    }
}
