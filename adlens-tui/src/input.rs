//! Keyboard input dispatch: overlays → search box → global keys → focused control.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use adlens_core::query::SortField;

use crate::app::{AppState, Focus, Overlay};

/// Handle one key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Dropdown { tier, cursor } => {
            handle_dropdown(app, key, tier, cursor);
            return;
        }
        Overlay::Calendar => {
            handle_calendar(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. The search box takes printable keys while focused.
    if app.focus == Focus::Search && handle_search(app, key, now) {
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('/') => {
            if app.is_focusable(Focus::Search) {
                app.focus = Focus::Search;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return;
        }
        KeyCode::Char('1') => {
            app.toggle_sort(SortField::Keyword);
            return;
        }
        KeyCode::Char('2') => {
            app.toggle_sort(SortField::AvgQs);
            return;
        }
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            app.next_page();
            return;
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
            app.prev_page();
            return;
        }
        _ => {}
    }

    // 4. Focused control.
    if app.focus == Focus::Table {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.move_table_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_table_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => app.table_home(),
            KeyCode::Char('G') | KeyCode::End => app.table_end(),
            _ => {}
        }
        return;
    }
    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
        match app.focus {
            Focus::Account | Focus::Campaign | Focus::AdGroup => {
                if let Some(tier) = app.focus.tier() {
                    app.open_dropdown(tier);
                }
            }
            Focus::DateRange => app.toggle_calendar(),
            Focus::Search | Focus::Table => {}
        }
    }
}

/// Returns `true` when the key was consumed by the search box.
fn handle_search(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.focus = Focus::Table;
            true
        }
        KeyCode::Backspace => {
            app.browser.search_pop(now);
            true
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.browser.search_push(c, now);
            true
        }
        _ => false,
    }
}

fn handle_dropdown(app: &mut AppState, key: KeyEvent, tier: adlens_core::selection::Tier, cursor: usize) {
    let choices = app.choices(tier);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
        KeyCode::Char('j') | KeyCode::Down => {
            let cursor = (cursor + 1).min(choices.len().saturating_sub(1));
            app.overlay = Overlay::Dropdown { tier, cursor };
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.overlay = Overlay::Dropdown {
                tier,
                cursor: cursor.saturating_sub(1),
            };
        }
        KeyCode::Home | KeyCode::Char('g') => app.overlay = Overlay::Dropdown { tier, cursor: 0 },
        KeyCode::End | KeyCode::Char('G') => {
            app.overlay = Overlay::Dropdown {
                tier,
                cursor: choices.len().saturating_sub(1),
            };
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.overlay = Overlay::None;
            if let Some(choice) = choices.get(cursor) {
                app.choose(tier, &choice.value);
            }
        }
        _ => {}
    }
}

fn handle_calendar(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.toggle_calendar(),
        KeyCode::Char('h') | KeyCode::Left => app.calendar.move_days(-1),
        KeyCode::Char('l') | KeyCode::Right => app.calendar.move_days(1),
        KeyCode::Char('k') | KeyCode::Up => app.calendar.move_days(-7),
        KeyCode::Char('j') | KeyCode::Down => app.calendar.move_days(7),
        KeyCode::PageUp | KeyCode::Char('[') => app.calendar.move_months(-1),
        KeyCode::PageDown | KeyCode::Char(']') => app.calendar.move_months(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_date(),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_core::config::LayoutConfig;
    use chrono::NaiveDate;
    use crossterm::event::KeyEventState;
    use std::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> AppState {
        let (tx, _rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        AppState::new(LayoutConfig::default(), today, tx, resp_rx)
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('q')), Instant::now());
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_quits_even_in_search() {
        let mut app = app();
        app.focus = Focus::Search;
        let key = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        };
        handle_key(&mut app, key, Instant::now());
        assert!(!app.running);
    }

    #[test]
    fn typing_in_search_does_not_trigger_globals() {
        let mut app = app();
        app.focus = Focus::Search;
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char('q')), now);
        handle_key(&mut app, press(KeyCode::Char('e')), now);
        assert!(app.running);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.browser.search_text(), "qe");
    }

    #[test]
    fn help_and_error_overlays_toggle() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('?')), Instant::now());
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Esc), Instant::now());
        assert_eq!(app.overlay, Overlay::None);

        handle_key(&mut app, press(KeyCode::Char('e')), Instant::now());
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        handle_key(&mut app, press(KeyCode::Char('e')), Instant::now());
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn ctrl_u_empties_search_box() {
        let mut app = app();
        app.focus = Focus::Search;
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char('s')), now);
        handle_key(&mut app, press(KeyCode::Char('h')), now);
        let key = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('u'))
        };
        handle_key(&mut app, key, now);
        assert_eq!(app.browser.search_text(), "");
        assert_eq!(app.focus, Focus::Search);
    }

    #[test]
    fn table_keys_stay_at_zero_without_rows() {
        let mut app = app();
        app.focus = Focus::Table;
        handle_key(&mut app, press(KeyCode::Char('j')), Instant::now());
        handle_key(&mut app, press(KeyCode::End), Instant::now());
        assert_eq!(app.table_cursor, 0);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let key = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Char('q'))
        };
        handle_key(&mut app, key, Instant::now());
        assert!(app.running);
    }
}
