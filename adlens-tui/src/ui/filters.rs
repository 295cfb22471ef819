//! Filter row: account, campaign and ad group selectors plus the date range box.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use adlens_core::domain::Entity;
use adlens_core::selection::Tier;
use adlens_core::selector::SelectorView;

use crate::app::{AppState, Focus};
use crate::theme;

/// Where each control was drawn, for anchoring popups.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterBoxes {
    pub account: Option<Rect>,
    pub campaign: Option<Rect>,
    pub ad_group: Option<Rect>,
    pub date: Rect,
}

impl FilterBoxes {
    pub fn anchor(&self, tier: Tier) -> Option<Rect> {
        match tier {
            Tier::Account => self.account,
            Tier::Campaign => self.campaign,
            Tier::AdGroup => self.ad_group,
        }
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) -> FilterBoxes {
    let account_tier = app.layout().account_tier;
    let constraints: Vec<Constraint> = if account_tier {
        vec![Constraint::Ratio(1, 4); 4]
    } else {
        vec![Constraint::Ratio(1, 3); 3]
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut boxes = FilterBoxes::default();
    let mut slot = cols.iter().copied();

    if account_tier {
        if let Some(rect) = slot.next() {
            render_selector(f, rect, app, Tier::Account, &app.account_view());
            boxes.account = Some(rect);
        }
    }
    if let Some(rect) = slot.next() {
        render_selector(f, rect, app, Tier::Campaign, &app.campaign_view());
        boxes.campaign = Some(rect);
    }
    if let Some(rect) = slot.next() {
        render_selector(f, rect, app, Tier::AdGroup, &app.ad_group_view());
        boxes.ad_group = Some(rect);
    }
    if let Some(rect) = slot.next() {
        render_date(f, rect, app);
        boxes.date = rect;
    }
    boxes
}

fn focus_of(tier: Tier) -> Focus {
    match tier {
        Tier::Account => Focus::Account,
        Tier::Campaign => Focus::Campaign,
        Tier::AdGroup => Focus::AdGroup,
    }
}

fn render_selector<T: Entity>(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    tier: Tier,
    view: &SelectorView<T>,
) {
    let focused = app.focus == focus_of(tier);
    let enabled = !matches!(view, SelectorView::Disabled { .. } | SelectorView::Hidden);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::control_border(focused, enabled))
        .title(format!(" {} ", tier.label()))
        .title_style(theme::control_title(focused));

    let line = match view {
        SelectorView::Hidden => Line::from(""),
        SelectorView::Disabled { prompt } => Line::from(Span::styled(*prompt, theme::muted())),
        SelectorView::Loading => Line::from(Span::styled("Loading…", theme::warning())),
        SelectorView::Failed { message } => {
            Line::from(Span::styled(message.as_str(), theme::negative()))
        }
        SelectorView::Ready { options } => {
            let selected = app.selection.selected_id(tier);
            let current = selected.and_then(|id| options.iter().find(|o| o.raw_id() == id));
            match current {
                Some(entity) => Line::from(vec![
                    Span::styled("● ", theme::status_badge(entity.status().is_enabled())),
                    Span::styled(entity.name().to_string(), theme::text()),
                    Span::styled(" ▾", theme::muted()),
                ]),
                None => Line::from(vec![
                    Span::styled(T::PLACEHOLDER, theme::muted()),
                    Span::styled(" ▾", theme::muted()),
                ]),
            }
        }
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_date(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::DateRange;
    let enabled = app.selection.eligibility().date_enabled;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::control_border(focused, enabled))
        .title(" Date Range ")
        .title_style(theme::control_title(focused));

    let label = app.selection.date_range().label();
    let style = if enabled { theme::text() } else { theme::muted() };
    let line = Line::from(vec![Span::styled("▦ ", theme::accent()), Span::styled(label, style)]);
    f.render_widget(Paragraph::new(line).block(block), area);
}
