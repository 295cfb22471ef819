//! Overlay widgets: selector dropdown, help, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use adlens_core::selection::Tier;

use crate::app::AppState;
use crate::theme;
use crate::ui::{below, centered_rect};

/// Open selector list under its control. Row 0 is the "no value" entry.
pub fn render_dropdown(
    f: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    app: &AppState,
    tier: Tier,
    cursor: usize,
) {
    let choices = app.choices(tier);
    let height = (choices.len() as u16 + 2).min(14);
    let popup = below(anchor, bounds, anchor.width.max(24), height);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} ", tier.label()))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let visible = inner.height as usize;
    let start = cursor.saturating_sub(visible.saturating_sub(1));
    let selected = app.selected_choice(tier);

    let lines: Vec<Line> = choices
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, choice)| {
            let mut style = match choice.enabled {
                None => theme::muted(),
                Some(_) => theme::text(),
            };
            if i == selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            if i == cursor {
                style = theme::selected_row();
            }
            let badge = match choice.enabled {
                Some(enabled) => Span::styled("● ", theme::status_badge(enabled)),
                None => Span::raw("  "),
            };
            Line::from(vec![badge, Span::styled(choice.label.clone(), style)])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Keyboard shortcuts.
pub fn render_help(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Navigation");
    key(&mut lines, "Tab / Shift+Tab", "Move focus (disabled controls are skipped)");
    key(&mut lines, "Enter / Space", "Open the focused selector or the calendar");
    key(&mut lines, "r", "Retry requests that failed");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Selector list");
    key(&mut lines, "j / k", "Move down / up");
    key(&mut lines, "Enter", "Choose (first row clears the selection)");
    key(&mut lines, "Esc", "Close");
    lines.push(Line::from(""));

    section(&mut lines, "Calendar");
    key(&mut lines, "h / l", "Previous / next day");
    key(&mut lines, "k / j", "Previous / next week");
    key(&mut lines, "[ / ]", "Previous / next month");
    key(&mut lines, "Enter", "Pick start, then end");
    lines.push(Line::from(""));

    section(&mut lines, "Keywords");
    if app.layout().search_and_sort {
        key(&mut lines, "/", "Search (applies after typing pauses)");
        key(&mut lines, "Ctrl+U", "Clear the search at once");
        key(&mut lines, "1 / 2", "Sort by keyword / quality score");
    }
    key(&mut lines, "n / p", "Next / previous page");
    key(&mut lines, "j / k", "Move the row cursor down / up");
    key(&mut lines, "g / G", "First / last row of the page");

    f.render_widget(Paragraph::new(lines), inner);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>18}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
