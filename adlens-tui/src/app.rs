//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.
//! Every user action ends in [`AppState::sync`], which adopts the current
//! selection, resolves restored choices and dispatches whatever fetch keys
//! are current and not yet cached or in flight.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use adlens_core::api::ApiError;
use adlens_core::config::LayoutConfig;
use adlens_core::domain::{Account, AdGroup, Campaign, DateRange, Entity, KeywordPage};
use adlens_core::fetch::{Caches, FetchState};
use adlens_core::query::{QueryKey, SortField};
use adlens_core::results::{KeywordBrowser, ResultsView};
use adlens_core::selection::{Selection, Tier};
use adlens_core::selector::{resolve_choice, Choice, SelectorView};

use crate::calendar::CalendarState;
use crate::worker::{WorkerCommand, WorkerResponse};

pub const ERROR_HISTORY_CAP: usize = 50;

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Account,
    Campaign,
    AdGroup,
    DateRange,
    Search,
    Table,
}

impl Focus {
    pub const ORDER: [Focus; 6] = [
        Focus::Account,
        Focus::Campaign,
        Focus::AdGroup,
        Focus::DateRange,
        Focus::Search,
        Focus::Table,
    ];

    pub fn tier(self) -> Option<Tier> {
        match self {
            Focus::Account => Some(Tier::Account),
            Focus::Campaign => Some(Tier::Campaign),
            Focus::AdGroup => Some(Tier::AdGroup),
            _ => None,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Http,
    Data,
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Worker => "WRK",
        }
    }
}

impl From<&ApiError> for ErrorCategory {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Network(_) => ErrorCategory::Network,
            ApiError::Status { .. } => ErrorCategory::Http,
            ApiError::Decode(_) => ErrorCategory::Data,
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Open selector list; `cursor` indexes [`AppState::choices`].
    Dropdown { tier: Tier, cursor: usize },
    Calendar,
    Help,
    ErrorHistory,
}

/// Ids restored from disk, waiting for their option lists to arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChoices {
    pub account: Option<i64>,
    pub campaign: Option<i64>,
    pub ad_group: Option<i64>,
}

impl PendingChoices {
    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.campaign.is_none() && self.ad_group.is_none()
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,

    pub selection: Selection,
    pub caches: Caches,
    pub browser: KeywordBrowser,
    pub calendar: CalendarState,
    pub pending: PendingChoices,
    pub today: NaiveDate,

    /// Highlighted row of the current keyword page.
    pub table_cursor: usize,
    /// Keyword key the cursor belongs to; a new key resets the cursor.
    table_key: Option<QueryKey>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl AppState {
    pub fn new(
        layout: LayoutConfig,
        today: NaiveDate,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let range = DateRange::last_30_days(today);
        let selection = Selection::new(layout, range);
        let browser = KeywordBrowser::new(&layout);
        let focus = if layout.account_tier {
            Focus::Account
        } else {
            Focus::Campaign
        };
        Self {
            running: true,
            focus,
            overlay: Overlay::None,
            selection,
            caches: Caches::default(),
            browser,
            calendar: CalendarState::new(range, today),
            pending: PendingChoices::default(),
            today,
            table_cursor: 0,
            table_key: None,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        *self.selection.layout()
    }

    // ── Composition ──────────────────────────────────────────────────

    /// Recompute eligibility consumers and dispatch current fetch keys.
    ///
    /// `user_action` is set for syncs triggered by input; only those retry
    /// keys whose last attempt failed.
    pub fn sync(&mut self, user_action: bool) {
        self.resolve_pending();

        for tier in Tier::ALL {
            if let Some(key) = self.selection.eligibility().gate(tier).key().cloned() {
                if self.caches.begin(&key, user_action) {
                    self.dispatch(key);
                }
            }
        }

        self.browser.set_disabled(self.overlay == Overlay::Calendar);
        self.browser.set_scope(self.selection.eligibility().results);
        self.sync_keywords(user_action);

        let key = self.browser.key();
        if key != self.table_key {
            self.table_cursor = 0;
            self.table_key = key;
        }
    }

    fn sync_keywords(&mut self, user_action: bool) {
        let Some(key) = self.browser.key() else {
            return;
        };
        if let Some(total) = self.caches.keywords.get(&key).and_then(|s| s.ready()).map(|p| p.total) {
            if self.browser.reconcile_total(total) {
                debug!(page = self.browser.page(), total, "page clamped");
                return self.sync_keywords(user_action);
            }
        }
        if self.caches.begin(&key, user_action) {
            self.dispatch(key);
        }
    }

    fn dispatch(&mut self, key: QueryKey) {
        let context = key.path();
        if let Err(e) = self.worker_tx.send(WorkerCommand::Fetch(key.clone())) {
            let err = ApiError::Network(format!("worker unavailable: {e}"));
            self.caches.complete(key, Err(err));
            self.push_error(ErrorCategory::Worker, "Background worker stopped".into(), context);
        }
    }

    /// Store a worker response and re-sync.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Fetched { key, result } => {
                if let Err(err) = &result {
                    self.push_error(ErrorCategory::from(err), err.to_string(), key.path());
                }
                self.caches.complete(key, result);
            }
        }
        self.sync(false);
    }

    /// Apply any queued worker responses without blocking.
    pub fn drain_responses(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_response(resp);
        }
    }

    /// Frame tick: promote debounced search text.
    pub fn tick(&mut self, now: Instant) {
        if self.browser.tick(now) {
            self.sync(true);
        }
    }

    /// Resolve restored ids top-down once their option lists are ready.
    fn resolve_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        if !self.layout().account_tier {
            self.pending.account = None;
        }

        if let Some(id) = self.pending.account {
            let Some(options) = self.ready_options::<Account>(Tier::Account) else {
                return;
            };
            let choice = resolve_choice(&options, &id.to_string());
            self.pending.account = None;
            if choice.is_none() {
                debug!(id, "restored account no longer listed");
                self.pending = PendingChoices::default();
            }
            self.selection.set_account(choice);
        }

        if let Some(id) = self.pending.campaign {
            let Some(options) = self.ready_options::<Campaign>(Tier::Campaign) else {
                return;
            };
            let choice = resolve_choice(&options, &id.to_string());
            self.pending.campaign = None;
            if choice.is_none() {
                debug!(id, "restored campaign no longer listed");
                self.pending.ad_group = None;
            }
            self.selection.set_campaign(choice);
        }

        if let Some(id) = self.pending.ad_group {
            let Some(options) = self.ready_options::<AdGroup>(Tier::AdGroup) else {
                return;
            };
            let choice = resolve_choice(&options, &id.to_string());
            self.pending.ad_group = None;
            if choice.is_none() {
                debug!(id, "restored ad group no longer listed");
            }
            self.selection.set_ad_group(choice);
        }
    }

    fn ready_options<T: CachedEntity>(&self, tier: Tier) -> Option<Vec<T>> {
        let key = self.selection.eligibility().gate(tier).key()?;
        T::cache(&self.caches).get(key)?.ready().cloned()
    }

    // ── Views ────────────────────────────────────────────────────────

    fn selector_view<T: CachedEntity>(&self, tier: Tier) -> SelectorView<T> {
        let gate = self.selection.eligibility().gate(tier);
        let state = gate.key().and_then(|k| T::cache(&self.caches).get(k));
        SelectorView::derive(gate, state)
    }

    pub fn account_view(&self) -> SelectorView<Account> {
        self.selector_view(Tier::Account)
    }

    pub fn campaign_view(&self) -> SelectorView<Campaign> {
        self.selector_view(Tier::Campaign)
    }

    pub fn ad_group_view(&self) -> SelectorView<AdGroup> {
        self.selector_view(Tier::AdGroup)
    }

    pub fn tier_accepts_input(&self, tier: Tier) -> bool {
        match tier {
            Tier::Account => self.account_view().accepts_input(),
            Tier::Campaign => self.campaign_view().accepts_input(),
            Tier::AdGroup => self.ad_group_view().accepts_input(),
        }
    }

    /// Rows of the list for `tier`, "no value" first.
    pub fn choices(&self, tier: Tier) -> Vec<Choice> {
        match tier {
            Tier::Account => self.account_view().choices(),
            Tier::Campaign => self.campaign_view().choices(),
            Tier::AdGroup => self.ad_group_view().choices(),
        }
    }

    /// Index of the current selection within [`Self::choices`].
    pub fn selected_choice(&self, tier: Tier) -> usize {
        let Some(id) = self.selection.selected_id(tier) else {
            return 0;
        };
        let value = id.to_string();
        self.choices(tier)
            .iter()
            .position(|c| c.value == value)
            .unwrap_or(0)
    }

    pub fn keyword_key(&self) -> Option<QueryKey> {
        self.browser.key()
    }

    fn keyword_state(&self) -> Option<&FetchState<KeywordPage>> {
        self.keyword_key().and_then(|k| self.caches.keywords.get(&k))
    }

    pub fn results_view(&self) -> ResultsView {
        self.browser.view(self.keyword_state())
    }

    /// Total reported for the current page, once loaded.
    pub fn current_total(&self) -> Option<u64> {
        self.keyword_state().and_then(|s| s.ready()).map(|p| p.total)
    }

    pub fn in_flight(&self) -> usize {
        self.caches.in_flight()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Apply a raw control value chosen from `tier`'s list.
    pub fn choose(&mut self, tier: Tier, raw: &str) {
        if !self.tier_accepts_input(tier) {
            self.set_warning(format!("{} list is not ready", tier.label()));
            return;
        }
        match tier {
            Tier::Account => {
                let choice = resolve_choice(self.account_view().options(), raw);
                self.selection.set_account(choice);
            }
            Tier::Campaign => {
                let choice = resolve_choice(self.campaign_view().options(), raw);
                self.selection.set_campaign(choice);
            }
            Tier::AdGroup => {
                let choice = resolve_choice(self.ad_group_view().options(), raw);
                self.selection.set_ad_group(choice);
            }
        }
        self.pending = PendingChoices::default();
        self.sync(true);
    }

    pub fn open_dropdown(&mut self, tier: Tier) {
        if self.tier_accepts_input(tier) {
            let cursor = self.selected_choice(tier);
            self.overlay = Overlay::Dropdown { tier, cursor };
        }
    }

    pub fn toggle_calendar(&mut self) {
        if !self.selection.eligibility().date_enabled {
            return;
        }
        if self.overlay == Overlay::Calendar {
            self.overlay = Overlay::None;
        } else {
            self.calendar = CalendarState::new(self.selection.date_range(), self.today);
            self.overlay = Overlay::Calendar;
        }
        self.sync(true);
    }

    /// Pick the calendar cursor day.
    pub fn pick_date(&mut self) {
        let range = self.selection.date_range().pick(self.calendar.cursor);
        self.selection.set_date_range(range);
        self.sync(true);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        if self.browser.toggle_sort(field) {
            self.sync(true);
        }
    }

    pub fn next_page(&mut self) {
        if !matches!(self.results_view(), ResultsView::Rows { .. }) {
            return;
        }
        if let Some(total) = self.current_total() {
            if self.browser.next_page(total) {
                self.sync(true);
            }
        }
    }

    pub fn prev_page(&mut self) {
        if !matches!(self.results_view(), ResultsView::Rows { .. }) {
            return;
        }
        if self.browser.prev_page() {
            self.sync(true);
        }
    }

    /// Empty the search box; an applied term is dropped without waiting.
    pub fn clear_search(&mut self) {
        if self.browser.search_clear() {
            self.sync(true);
        }
    }

    /// Rows on the loaded keyword page, zero while nothing is shown.
    pub fn table_rows(&self) -> usize {
        match self.results_view() {
            ResultsView::Rows { keywords, .. } => keywords.len(),
            _ => 0,
        }
    }

    /// Move the row cursor by `delta`, clamped to the loaded page.
    pub fn move_table_cursor(&mut self, delta: isize) {
        let last = self.table_rows().saturating_sub(1);
        let next = self.table_cursor.saturating_add_signed(delta);
        self.table_cursor = next.min(last);
    }

    pub fn table_home(&mut self) {
        self.table_cursor = 0;
    }

    pub fn table_end(&mut self) {
        self.table_cursor = self.table_rows().saturating_sub(1);
    }

    /// Re-request everything for the current selection that failed.
    pub fn reload(&mut self) {
        self.sync(true);
        self.set_status("Reloading failed requests");
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn is_focusable(&self, focus: Focus) -> bool {
        let layout = self.layout();
        match focus {
            Focus::Account | Focus::Campaign | Focus::AdGroup => focus
                .tier()
                .map(|t| t.is_shown(&layout) && self.selection.eligibility().gate(t).is_enabled())
                .unwrap_or(false),
            Focus::DateRange => self.selection.eligibility().date_enabled,
            Focus::Search => layout.search_and_sort && self.browser.is_enabled(),
            Focus::Table => true,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.cycle_focus(Focus::ORDER.len() - 1);
    }

    fn cycle_focus(&self, step: usize) -> Focus {
        let order = Focus::ORDER;
        let start = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        (1..=order.len())
            .map(|i| order[(start + i * step) % order.len()])
            .find(|f| self.is_focusable(*f))
            .unwrap_or(Focus::Table)
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        self.error_history.truncate(ERROR_HISTORY_CAP);
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

/// Entity types with a dedicated cache in [`Caches`].
pub trait CachedEntity: Entity {
    fn cache(caches: &Caches) -> &adlens_core::fetch::FetchCache<Vec<Self>>;
}

impl CachedEntity for Account {
    fn cache(caches: &Caches) -> &adlens_core::fetch::FetchCache<Vec<Self>> {
        &caches.accounts
    }
}

impl CachedEntity for Campaign {
    fn cache(caches: &Caches) -> &adlens_core::fetch::FetchCache<Vec<Self>> {
        &caches.campaigns
    }
}

impl CachedEntity for AdGroup {
    fn cache(caches: &Caches) -> &adlens_core::fetch::FetchCache<Vec<Self>> {
        &caches.ad_groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn app(layout: LayoutConfig) -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (tx, rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        (AppState::new(layout, today, tx, resp_rx), rx)
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = app(LayoutConfig::default());
        for i in 0..60 {
            app.push_error(ErrorCategory::Network, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn initial_sync_requests_accounts_only() {
        let (mut app, rx) = app(LayoutConfig::default());
        app.sync(true);
        let sent: Vec<_> = rx.try_iter().collect();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], WorkerCommand::Fetch(QueryKey::Accounts)));
    }

    #[test]
    fn compact_layout_requests_all_campaigns() {
        let (mut app, rx) = app(LayoutConfig::compact());
        app.sync(true);
        let sent: Vec<_> = rx.try_iter().collect();
        assert!(matches!(
            &sent[..],
            [WorkerCommand::Fetch(QueryKey::Campaigns { account: None })]
        ));
        assert_eq!(app.focus, Focus::Campaign);
    }

    #[test]
    fn focus_skips_disabled_controls() {
        let (mut app, _rx) = app(LayoutConfig::default());
        app.sync(true);
        // Nothing loaded yet: only the table is focusable.
        app.focus_next();
        assert_eq!(app.focus, Focus::Table);
    }

    #[test]
    fn date_toggle_ignored_without_ad_group() {
        let (mut app, _rx) = app(LayoutConfig::default());
        app.toggle_calendar();
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn api_errors_map_to_categories() {
        assert_eq!(ErrorCategory::from(&ApiError::Network("x".into())), ErrorCategory::Network);
        assert_eq!(
            ErrorCategory::from(&ApiError::Status { code: 404, path: "/a".into() }).label(),
            "HTTP"
        );
    }
}
