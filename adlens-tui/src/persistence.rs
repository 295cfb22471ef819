//! Selection persistence: JSON save/load across restarts.
//!
//! Entity ids are restored as pending choices and resolved once their option
//! lists arrive, so an id that no longer exists quietly becomes "no value".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use adlens_core::domain::DateRange;
use adlens_core::selection::Tier;

use crate::app::{AppState, PendingChoices};

pub const STATE_FILE_NAME: &str = "state.json";

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub account_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub date_range: Option<DateRange>,
}

/// `<config_dir>/adlens/state.json`.
pub fn state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adlens")
        .join(STATE_FILE_NAME)
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
///
/// Ids still pending (lists never arrived) are written back unchanged.
pub fn extract(app: &AppState) -> PersistedState {
    let pick = |tier: Tier, pending: Option<i64>| pending.or(app.selection.selected_id(tier));
    PersistedState {
        account_id: pick(Tier::Account, app.pending.account),
        campaign_id: pick(Tier::Campaign, app.pending.campaign),
        ad_group_id: pick(Tier::AdGroup, app.pending.ad_group),
        date_range: Some(app.selection.date_range()),
    }
}

/// Apply persisted state to AppState. Call before the first sync.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(range) = state.date_range {
        app.selection.set_date_range(range);
    }
    app.pending = PendingChoices {
        account: state.account_id,
        campaign: state.campaign_id,
        ad_group: state.ad_group_id,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adlens").join(STATE_FILE_NAME);

        let state = PersistedState {
            account_id: Some(1),
            campaign_id: Some(2),
            ad_group_id: Some(42),
            date_range: Some(DateRange::new(d(1, 1), d(1, 31))),
        };
        save(&path, &state).unwrap();
        assert_eq!(load(&path), state);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded, PersistedState::default());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert_eq!(load(&path), PersistedState::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE_NAME);
        std::fs::write(&path, r#"{"account_id": 7}"#).unwrap();
        let loaded = load(&path);
        assert_eq!(loaded.account_id, Some(7));
        assert!(loaded.date_range.is_none());
    }
}
