//! Date range picker state: a cursor day and the two months on screen.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use adlens_core::domain::DateRange;

/// One week row, Monday first. `None` pads days outside the month.
pub type Week = [Option<NaiveDate>; 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    /// Day under the cursor.
    pub cursor: NaiveDate,
    /// First day of the left-hand month.
    pub first_month: NaiveDate,
}

impl CalendarState {
    /// Open on the start of `range`, or on `today` when the range is empty.
    pub fn new(range: DateRange, today: NaiveDate) -> Self {
        let cursor = range.from.unwrap_or(today);
        Self {
            cursor,
            first_month: first_of_month(cursor),
        }
    }

    pub fn second_month(&self) -> NaiveDate {
        self.first_month + Months::new(1)
    }

    /// Move the cursor by `days`, scrolling so it stays on one of the two months.
    pub fn move_days(&mut self, days: i64) {
        if let Some(next) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = next;
            self.follow_cursor();
        }
    }

    pub fn move_months(&mut self, months: i32) {
        let shifted = if months >= 0 {
            self.cursor.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.cursor.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(next) = shifted {
            self.cursor = next;
            self.follow_cursor();
        }
    }

    fn follow_cursor(&mut self) {
        let month = first_of_month(self.cursor);
        if month < self.first_month {
            self.first_month = month;
        } else if month > self.second_month() {
            self.first_month = month - Months::new(1);
        }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weeks of the month starting at `first`, Monday first.
pub fn month_grid(first: NaiveDate) -> Vec<Week> {
    let first = first_of_month(first);
    let lead = first.weekday().num_days_from_monday() as usize;
    let next = first + Months::new(1);

    let mut weeks = Vec::with_capacity(6);
    let mut week: Week = [None; 7];
    let mut slot = lead;
    let mut day = first;
    while day < next {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        day = day.succ_opt().unwrap_or(next);
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

pub const WEEKDAY_HEADER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn february_2024_grid() {
        // Feb 1 2024 was a Thursday; leap year.
        let weeks = month_grid(d(2024, 2, 1));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][..3], [None, None, None]);
        assert_eq!(weeks[0][3], Some(d(2024, 2, 1)));
        assert_eq!(weeks[4][3], Some(d(2024, 2, 29)));
        assert_eq!(weeks[4][4], None);
    }

    #[test]
    fn opens_on_range_start() {
        let cal = CalendarState::new(DateRange::new(d(2024, 3, 10), d(2024, 3, 20)), d(2024, 6, 1));
        assert_eq!(cal.cursor, d(2024, 3, 10));
        assert_eq!(cal.first_month, d(2024, 3, 1));
        assert_eq!(cal.second_month(), d(2024, 4, 1));
    }

    #[test]
    fn cursor_scrolls_visible_months() {
        let mut cal = CalendarState::new(DateRange::empty(), d(2024, 1, 31));
        cal.move_days(1);
        assert_eq!(cal.cursor, d(2024, 2, 1));
        assert_eq!(cal.first_month, d(2024, 1, 1));

        cal.move_months(1);
        assert_eq!(cal.cursor, d(2024, 3, 1));
        assert_eq!(cal.first_month, d(2024, 2, 1));

        cal.move_days(-40);
        assert_eq!(cal.first_month, d(2024, 1, 1));
    }
}
