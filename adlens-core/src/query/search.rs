//! Free-text keyword search: debounce window and minimum-length rule.

use std::time::{Duration, Instant};

/// Quiescence window between the last keystroke and applying the search.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Minimum trimmed length for a search term to be sent to the server.
pub const MIN_SEARCH_CHARS: usize = 2;

/// How an applied search term affects the keyword query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// No search; fetch unfiltered.
    None,
    /// Too short to send. Nothing is fetched until the user types more.
    TooShort,
    /// Send as the `search` parameter.
    Filter(String),
}

impl SearchTerm {
    pub fn classify(raw: &str) -> SearchTerm {
        let trimmed = raw.trim();
        match trimmed.chars().count() {
            0 => SearchTerm::None,
            n if n < MIN_SEARCH_CHARS => SearchTerm::TooShort,
            _ => SearchTerm::Filter(trimmed.to_string()),
        }
    }

    pub fn as_filter(&self) -> Option<&str> {
        match self {
            SearchTerm::Filter(s) => Some(s),
            _ => None,
        }
    }
}

/// Decouples raw keystrokes from the value that drives fetching.
///
/// `push` and `pop` edit the raw text and restart the window; `poll` promotes the
/// raw text to the applied value once `window` has elapsed without input.
/// Time is passed in so the behaviour is deterministic under test.
#[derive(Debug, Clone)]
pub struct Debouncer {
    raw: String,
    applied: String,
    last_input: Option<Instant>,
    window: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            raw: String::new(),
            applied: String::new(),
            last_input: None,
            window,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn is_pending(&self) -> bool {
        self.last_input.is_some()
    }

    pub fn push(&mut self, c: char, now: Instant) {
        self.raw.push(c);
        self.last_input = Some(now);
    }

    pub fn pop(&mut self, now: Instant) {
        if self.raw.pop().is_some() {
            self.last_input = Some(now);
        }
    }

    /// Returns `true` when the applied value changed on this poll.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_input else {
            return false;
        };
        if now.duration_since(last) < self.window {
            return false;
        }
        self.last_input = None;
        if self.raw == self.applied {
            return false;
        }
        self.applied = self.raw.clone();
        true
    }

    /// Drop both raw and applied text immediately.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.applied.clear();
        self.last_input = None;
    }
}
