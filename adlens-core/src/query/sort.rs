//! Three-state column sort as an explicit state machine.
//!
//! Transition table for a click on column `c`:
//!
//! | current          | next             |
//! |------------------|------------------|
//! | Unsorted         | Ascending(c)     |
//! | Ascending(c)     | Descending(c)    |
//! | Descending(c)    | Unsorted         |
//! | Ascending(other) | Ascending(c)     |
//! | Descending(other)| Ascending(c)     |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sortable columns of the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Keyword,
    AvgQs,
}

impl SortField {
    /// Value of the `sortField` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortField::Keyword => "keyword",
            SortField::AvgQs => "avgQs",
        }
    }

    /// Column header text.
    pub fn header(self) -> &'static str {
        match self {
            SortField::Keyword => "Keyword",
            SortField::AvgQs => "Avg Quality Score",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Value of the `sortDirection` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending(SortField),
    Descending(SortField),
}

impl SortState {
    /// Next state after a click on `field`'s header.
    pub fn toggle(self, field: SortField) -> SortState {
        match self {
            SortState::Ascending(f) if f == field => SortState::Descending(f),
            SortState::Descending(f) if f == field => SortState::Unsorted,
            _ => SortState::Ascending(field),
        }
    }

    pub fn field(self) -> Option<SortField> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(f) | SortState::Descending(f) => Some(f),
        }
    }

    pub fn direction(self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(_) => Some(SortDirection::Ascending),
            SortState::Descending(_) => Some(SortDirection::Descending),
        }
    }

    /// Direction applied to `field`, or `None` if that column is not the active one.
    pub fn direction_of(self, field: SortField) -> Option<SortDirection> {
        if self.field() == Some(field) {
            self.direction()
        } else {
            None
        }
    }
}
