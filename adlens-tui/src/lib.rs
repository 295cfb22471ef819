//! adlens TUI - terminal keyword analytics dashboard.
//!
//! Cascading account, campaign and ad group selectors feed a date range and
//! a paginated keyword table. All reads go through a background worker.

pub mod app;
pub mod calendar;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::Theme;
