//! Bottom status bar: key hints, request activity, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " Tab:focus Enter:open /:search 1/2:sort n/p:page r:reload ?:help q:quit",
        theme::muted(),
    ));

    let in_flight = app.in_flight();
    if in_flight > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("{in_flight} loading"), theme::warning()));
    }

    if !app.error_history.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("e:{} errors", app.error_history.len()),
            theme::negative(),
        ));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
