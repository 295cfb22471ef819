//! Inclusive date range used to scope keyword queries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Display format for a single date, e.g. "Jan 05, 2024".
pub const LABEL_DATE_FORMAT: &str = "%b %d, %Y";

/// Wire format for the `start`/`end` query parameters.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

pub const EMPTY_LABEL: &str = "Select date range";

/// Number of days before today that the default range starts at.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 30;

/// A possibly incomplete date range. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Last 30 days through `today`.
    pub fn last_30_days(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
            .unwrap_or(today);
        Self::new(from, today)
    }

    /// Both endpoints, if the range is complete (both ends set).
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= date && date <= to,
            (Some(from), None) => from == date,
            _ => false,
        }
    }

    /// Human-readable label for the selector button.
    pub fn label(&self) -> String {
        match (self.from, self.to) {
            (None, _) => EMPTY_LABEL.to_string(),
            (Some(from), None) => from.format(LABEL_DATE_FORMAT).to_string(),
            (Some(from), Some(to)) => format!(
                "{} – {}",
                from.format(LABEL_DATE_FORMAT),
                to.format(LABEL_DATE_FORMAT)
            ),
        }
    }

    /// Apply one calendar pick in range mode and return the new range.
    ///
    /// - empty or complete range: the pick starts a new range
    /// - only `from` set, pick on or after it: completes the range
    /// - only `from` set, pick before it: the pick becomes `from`, old `from` becomes `to`
    pub fn pick(self, date: NaiveDate) -> Self {
        match (self.from, self.to) {
            (Some(from), None) if date >= from => Self { from: Some(from), to: Some(date) },
            (Some(from), None) => Self { from: Some(date), to: Some(from) },
            _ => Self { from: Some(date), to: None },
        }
    }
}

/// Format a date for the wire (`YYYY-MM-DD`, no time component).
pub fn query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn label_has_three_shapes() {
        assert_eq!(DateRange::empty().label(), "Select date range");

        let start_only = DateRange { from: Some(d(2024, 1, 5)), to: None };
        assert_eq!(start_only.label(), "Jan 05, 2024");

        let full = DateRange::new(d(2024, 1, 5), d(2024, 1, 31));
        assert_eq!(full.label(), "Jan 05, 2024 – Jan 31, 2024");
    }

    #[test]
    fn label_ignores_lonely_end() {
        let end_only = DateRange { from: None, to: Some(d(2024, 1, 5)) };
        assert_eq!(end_only.label(), EMPTY_LABEL);
        assert_eq!(end_only.bounds(), None);
    }

    #[test]
    fn default_range_spans_thirty_days() {
        let today = d(2024, 3, 1);
        let range = DateRange::last_30_days(today);
        assert_eq!(range.from, Some(d(2024, 1, 31)));
        assert_eq!(range.to, Some(today));
        assert_eq!(range.bounds(), Some((d(2024, 1, 31), today)));
    }

    #[test]
    fn pick_builds_range_in_two_steps() {
        let r = DateRange::empty().pick(d(2024, 1, 10));
        assert_eq!(r, DateRange { from: Some(d(2024, 1, 10)), to: None });
        let r = r.pick(d(2024, 1, 20));
        assert_eq!(r, DateRange::new(d(2024, 1, 10), d(2024, 1, 20)));
    }

    #[test]
    fn pick_before_start_swaps() {
        let r = DateRange::empty().pick(d(2024, 1, 10)).pick(d(2024, 1, 3));
        assert_eq!(r, DateRange::new(d(2024, 1, 3), d(2024, 1, 10)));
    }

    #[test]
    fn pick_on_complete_range_restarts() {
        let r = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).pick(d(2024, 2, 2));
        assert_eq!(r, DateRange { from: Some(d(2024, 2, 2)), to: None });
    }

    #[test]
    fn same_day_range_has_bounds() {
        let r = DateRange::empty().pick(d(2024, 1, 10)).pick(d(2024, 1, 10));
        assert_eq!(r.bounds(), Some((d(2024, 1, 10), d(2024, 1, 10))));
        assert!(r.contains(d(2024, 1, 10)));
    }

    #[test]
    fn query_date_has_no_time() {
        assert_eq!(query_date(d(2024, 1, 1)), "2024-01-01");
    }
}
