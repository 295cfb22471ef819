//! Two-month calendar overlay for picking the date range.

use chrono::{Datelike, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use adlens_core::domain::DateRange;

use crate::app::AppState;
use crate::calendar::{month_grid, WEEKDAY_HEADER};
use crate::theme;

const MONTH_WIDTH: u16 = 22;

pub fn render(f: &mut Frame, anchor: Rect, bounds: Rect, app: &AppState) {
    let width = MONTH_WIDTH * 2 + 5;
    let popup = super::below(anchor, bounds, width, 12);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Date Range [Enter]pick [[/]]month [Esc]close ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MONTH_WIDTH + 1), Constraint::Length(MONTH_WIDTH)])
        .split(inner);

    let range = app.selection.date_range();
    let cursor = app.calendar.cursor;
    let months = [app.calendar.first_month, app.calendar.second_month()];
    for (area, first) in cols.iter().zip(months) {
        let lines = month_lines(first, range, cursor, app.today);
        f.render_widget(Paragraph::new(lines), *area);
    }
}

fn month_lines(first: NaiveDate, range: DateRange, cursor: NaiveDate, today: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{:^21}", first.format("%B %Y").to_string()),
        theme::accent_bold(),
    ))];

    let header: Vec<Span> = WEEKDAY_HEADER
        .iter()
        .map(|d| Span::styled(format!("{:>3}", &d.to_string()[..2]), theme::muted()))
        .collect();
    lines.push(Line::from(header));

    for week in month_grid(first) {
        let spans: Vec<Span> = week
            .iter()
            .map(|day| match day {
                None => Span::raw("   "),
                Some(date) => Span::styled(format!("{:>3}", date.day()), day_style(*date, range, cursor, today)),
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

fn day_style(date: NaiveDate, range: DateRange, cursor: NaiveDate, today: NaiveDate) -> Style {
    let mut style = if range.from == Some(date) || range.to == Some(date) {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else if range.contains(date) {
        theme::accent()
    } else {
        theme::text()
    };
    if date == today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if date == cursor {
        style = style.patch(theme::warning()).add_modifier(Modifier::BOLD);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn month_has_title_header_and_weeks() {
        let lines = month_lines(d(2, 1), DateRange::empty(), d(2, 10), d(2, 10));
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[0].to_string().contains("February 2024"));
        assert_eq!(lines[1].to_string(), " Mo Tu We Th Fr Sa Su");
    }

    #[test]
    fn range_ends_are_highlighted() {
        let range = DateRange::new(d(1, 5), d(1, 9));
        let end = day_style(d(1, 5), range, d(2, 1), d(3, 1));
        let inside = day_style(d(1, 7), range, d(2, 1), d(3, 1));
        let outside = day_style(d(1, 20), range, d(2, 1), d(3, 1));
        assert!(end.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(inside, theme::accent());
        assert_eq!(outside, theme::text());
    }
}
