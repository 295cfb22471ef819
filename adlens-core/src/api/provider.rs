//! Remote data provider trait and structured error types.
//!
//! The `DashboardApi` trait abstracts over the backend so the composer can be
//! driven by the real HTTP client or by an in-memory fake in tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Account, AccountId, AdGroup, Campaign, CampaignId, KeywordPage};
use crate::query::{KeywordQuery, QueryKey};

/// Any failed read. Surfaced only in the render region of the component
/// that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned HTTP {code} for {path}")]
    Status { code: u16, path: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Read-only access to the four backend resources.
pub trait DashboardApi: Send + Sync {
    fn accounts(&self) -> Result<Vec<Account>, ApiError>;

    /// Campaigns of one account, or every campaign when `account` is `None`.
    fn campaigns(&self, account: Option<AccountId>) -> Result<Vec<Campaign>, ApiError>;

    fn ad_groups(&self, campaign: CampaignId) -> Result<Vec<AdGroup>, ApiError>;

    fn keywords(&self, query: &KeywordQuery) -> Result<KeywordPage, ApiError>;
}

/// Decoded body of one request, tagged by resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Accounts(Vec<Account>),
    Campaigns(Vec<Campaign>),
    AdGroups(Vec<AdGroup>),
    Keywords(KeywordPage),
}

/// Execute the request identified by `key`.
pub fn fetch(api: &dyn DashboardApi, key: &QueryKey) -> Result<Payload, ApiError> {
    match key {
        QueryKey::Accounts => api.accounts().map(Payload::Accounts),
        QueryKey::Campaigns { account } => api.campaigns(*account).map(Payload::Campaigns),
        QueryKey::AdGroups { campaign } => api.ad_groups(*campaign).map(Payload::AdGroups),
        QueryKey::Keywords(query) => api.keywords(query).map(Payload::Keywords),
    }
}

/// Response body, with or without the `{ "data": ... }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

/// Decode a JSON body, unwrapping the `data` envelope when present.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope::Wrapped { data }) | Ok(Envelope::Bare(data)) => Ok(data),
        Err(_) => {
            // Re-run against the bare shape so the error names the real problem.
            serde_json::from_str::<T>(body).map_err(|e| ApiError::Decode(e.to_string()))
        }
    }
}
