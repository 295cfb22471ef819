//! Top-level UI layout: filter row, search bar, keyword table, status bar.

pub mod calendar;
pub mod filters;
pub mod keyword_table;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{AppState, Overlay};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let search_rows = if app.layout().search_and_sort { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(search_rows),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let screen = f.area();
    let filter_boxes = filters::render(f, chunks[0], app);
    if search_rows > 0 {
        keyword_table::render_search(f, chunks[1], app);
    }
    keyword_table::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    // Overlays on top.
    match app.overlay {
        Overlay::Dropdown { tier, cursor } => {
            let anchor = filter_boxes.anchor(tier).unwrap_or(chunks[0]);
            overlays::render_dropdown(f, anchor, screen, app, tier, cursor);
        }
        Overlay::Calendar => {
            calendar::render(f, filter_boxes.date, screen, app);
        }
        Overlay::Help => overlays::render_help(f, screen, app),
        Overlay::ErrorHistory => overlays::render_error_history(f, screen, app),
        Overlay::None => {}
    }
}

/// Popup placed directly under `anchor`, clipped to `bounds`.
pub fn below(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let x = anchor.x.min(bounds.right().saturating_sub(width));
    let y = anchor.bottom();
    let width = width.min(bounds.right().saturating_sub(x));
    let height = height.min(bounds.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
