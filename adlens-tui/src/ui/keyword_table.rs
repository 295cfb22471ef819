//! Keyword results: search box, sortable two-column table, pagination footer.

use std::ops::Range;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use adlens_core::domain::Keyword;
use adlens_core::query::{Pagination, SortField, SortState};
use adlens_core::results::{ResultsView, DISABLED_PROMPT, LOAD_ERROR};

use crate::app::{AppState, Focus};
use crate::theme;

const QS_WIDTH: usize = 20;

pub fn render_search(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Search;
    let enabled = app.browser.is_enabled();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::control_border(focused, enabled))
        .title(" Search keywords [/] ")
        .title_style(theme::control_title(focused));

    let text = app.browser.search_text();
    let mut spans = vec![Span::styled("⌕ ", theme::accent())];
    if text.is_empty() && !focused {
        spans.push(Span::styled("Type to filter keywords…", theme::muted()));
    } else {
        spans.push(Span::styled(text.to_string(), theme::text()));
    }
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    if app.browser.search_pending() {
        spans.push(Span::styled("  …", theme::warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Table;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::control_border(focused, app.browser.is_enabled()))
        .title_style(theme::control_title(focused));
    let inner = block.inner(area);

    let (keywords, pagination) = match app.results_view() {
        ResultsView::Rows {
            keywords,
            pagination,
        } => (keywords, pagination),
        other => {
            f.render_widget(block.title(" Keywords "), area);
            let (message, style) = match &other {
                ResultsView::Disabled => (DISABLED_PROMPT, theme::muted()),
                ResultsView::Loading => ("Loading keywords…", theme::warning()),
                ResultsView::Failed => (LOAD_ERROR, theme::negative()),
                ResultsView::Empty(reason) => (reason.message(), theme::muted()),
                ResultsView::Rows { .. } => return,
            };
            centered_message(f, inner, message, style);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);
    // One line of the table area holds the column header.
    let visible = (rows[0].height as usize).saturating_sub(1);
    let window = row_window(keywords.len(), app.table_cursor, visible);
    let title = if window.is_empty() {
        " Keywords ".to_string()
    } else {
        format!(" Keywords  rows {}-{} of {} ", window.start + 1, window.end, keywords.len())
    };
    f.render_widget(block.title(title), area);

    let table = TableView {
        sort: app.browser.sort(),
        sortable: app.browser.search_and_sort(),
        cursor: focused.then_some(app.table_cursor),
    };
    render_rows(f, rows[0], &keywords, window, &table);
    render_footer(f, rows[1], &pagination);
}

/// Rows of a `len`-row page that fit in `visible` lines with `cursor` on screen.
pub fn row_window(len: usize, cursor: usize, visible: usize) -> Range<usize> {
    if len == 0 || visible == 0 {
        return 0..0;
    }
    let cursor = cursor.min(len - 1);
    let offset = (cursor + 1).saturating_sub(visible);
    offset..(offset + visible).min(len)
}

fn centered_message(f: &mut Frame, area: Rect, message: &str, style: ratatui::style::Style) {
    let top = area.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); top as usize];
    lines.push(Line::from(Span::styled(message.to_string(), style)));
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

/// Column header text with the sort arrow for the active column.
pub fn header_label(field: SortField, sort: SortState, sortable: bool) -> String {
    let hotkey = match field {
        SortField::Keyword => "1",
        SortField::AvgQs => "2",
    };
    match (sortable, sort.direction_of(field)) {
        (false, _) => field.header().to_string(),
        (true, Some(dir)) => format!("{} {} [{hotkey}]", field.header(), dir.arrow()),
        (true, None) => format!("{} [{hotkey}]", field.header()),
    }
}

struct TableView {
    sort: SortState,
    sortable: bool,
    /// Highlighted row, only while the table has focus.
    cursor: Option<usize>,
}

fn render_rows(f: &mut Frame, area: Rect, keywords: &[Keyword], window: Range<usize>, table: &TableView) {
    let sort = table.sort;
    let keyword_width = (area.width as usize).saturating_sub(QS_WIDTH + 2).max(8);
    let header_style = |field: SortField| {
        if sort.field() == Some(field) {
            theme::accent_bold().add_modifier(Modifier::UNDERLINED)
        } else {
            theme::accent_bold()
        }
    };

    let mut lines: Vec<Line> = Vec::with_capacity(window.len() + 1);
    lines.push(Line::from(vec![
        Span::styled(
            format!(
                "{:<width$}",
                header_label(SortField::Keyword, sort, table.sortable),
                width = keyword_width
            ),
            header_style(SortField::Keyword),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{:>QS_WIDTH$}", header_label(SortField::AvgQs, sort, table.sortable)),
            header_style(SortField::AvgQs),
        ),
    ]));

    let offset = window.start;
    for (i, kw) in keywords.iter().enumerate().skip(offset).take(window.len()) {
        let line = Line::from(vec![
            Span::styled(
                format!("{:<width$}", truncate(&kw.keyword, keyword_width), width = keyword_width),
                theme::text(),
            ),
            Span::raw("  "),
            Span::styled(format!("{:>QS_WIDTH$}", kw.avg_qs_display()), theme::quality(kw.avg_qs)),
        ]);
        if table.cursor == Some(i) {
            lines.push(line.style(theme::selected_row()));
        } else {
            lines.push(line);
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// "Showing a to b of n results" and "Page p of P".
pub fn footer_text(pagination: &Pagination) -> (String, String) {
    let (first, last) = pagination.showing();
    (
        format!("Showing {first} to {last} of {} results", pagination.total),
        format!("Page {} of {}", pagination.page, pagination.total_pages()),
    )
}

fn render_footer(f: &mut Frame, area: Rect, pagination: &Pagination) {
    let (showing, page) = footer_text(pagination);
    let nav = |enabled: bool| if enabled { theme::accent() } else { theme::muted() };
    let line = Line::from(vec![
        Span::styled(showing, theme::muted()),
        Span::raw("   "),
        Span::styled("◀ Previous [p]", nav(pagination.has_prev())),
        Span::raw("  "),
        Span::styled(page, theme::text()),
        Span::raw("  "),
        Span::styled("Next [n] ▶", nav(pagination.has_next())),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
