//! Color tokens and style helpers for the AdLens TUI.
//!
//! # Color Palette
//! - **Accent**: cyan (focus, highlights, active sort column)
//! - **Positive**: green (ENABLED badge, high quality scores)
//! - **Negative**: pink (non-enabled badge, errors)
//! - **Warning**: orange (loading, pending search)
//! - **Muted**: steel blue (disabled controls, secondary text)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub const fn neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Quality score color: 7+ good, 4+ middling, below poor.
    pub fn quality_color(&self, avg_qs: f64) -> Color {
        match avg_qs {
            q if q >= 7.0 => self.positive,
            q if q >= 4.0 => self.accent,
            _ => self.warning,
        }
    }

    pub fn status_color(&self, enabled: bool) -> Color {
        if enabled {
            self.positive
        } else {
            self.negative
        }
    }
}

const THEME: Theme = Theme::neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn status_badge(enabled: bool) -> Style {
    Style::default().fg(THEME.status_color(enabled))
}

pub fn quality(avg_qs: f64) -> Style {
    Style::default().fg(THEME.quality_color(avg_qs))
}

/// Border for a control: accent when focused, dim when disabled.
pub fn control_border(focused: bool, enabled: bool) -> Style {
    match (focused, enabled) {
        (true, _) => accent_bold(),
        (false, true) => text(),
        (false, false) => muted().add_modifier(Modifier::DIM),
    }
}

pub fn control_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        muted()
    }
}

pub fn selected_row() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}
