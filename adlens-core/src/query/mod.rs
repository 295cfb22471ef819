//! Query state for the keyword table: sort FSM, pagination, search, request keys.

pub mod key;
pub mod keyword_query;
pub mod pagination;
pub mod search;
pub mod sort;

pub use key::QueryKey;
pub use keyword_query::KeywordQuery;
pub use pagination::Pagination;
pub use search::{Debouncer, SearchTerm, MIN_SEARCH_CHARS, SEARCH_DEBOUNCE};
pub use sort::{SortDirection, SortField, SortState};
