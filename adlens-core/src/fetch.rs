//! Per-key fetch bookkeeping shared by every remote-backed view.
//!
//! The cache never cancels anything. A response is stored under the key it
//! was issued for, and views only ever look up the key for the current
//! selection, so a late response for an old key cannot reach the screen.

use std::collections::HashMap;

use tracing::debug;

use crate::api::{ApiError, Payload};
use crate::domain::{Account, AdGroup, Campaign, KeywordPage};
use crate::query::QueryKey;

/// Lifecycle of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<V> {
    Loading,
    Ready(V),
    Failed(ApiError),
}

impl<V> FetchState<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&V> {
        match self {
            FetchState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Results keyed by `QueryKey`, at most one in flight per key.
#[derive(Debug, Clone)]
pub struct FetchCache<V> {
    entries: HashMap<QueryKey, FetchState<V>>,
}

impl<V> Default for FetchCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> FetchCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as loading if it needs a request.
    ///
    /// Returns `true` when the caller should dispatch. `Loading` and `Ready`
    /// keys are never re-requested; a `Failed` key is retried only when
    /// `retry_failed` is set.
    pub fn begin(&mut self, key: &QueryKey, retry_failed: bool) -> bool {
        let dispatch = match self.entries.get(key) {
            None => true,
            Some(FetchState::Failed(_)) => retry_failed,
            Some(_) => false,
        };
        if dispatch {
            debug!(%key, "fetch dispatched");
            self.entries.insert(key.clone(), FetchState::Loading);
        }
        dispatch
    }

    pub fn complete(&mut self, key: QueryKey, result: Result<V, ApiError>) {
        let state = match result {
            Ok(v) => FetchState::Ready(v),
            Err(e) => FetchState::Failed(e),
        };
        self.entries.insert(key, state);
    }

    pub fn get(&self, key: &QueryKey) -> Option<&FetchState<V>> {
        self.entries.get(key)
    }

    pub fn in_flight(&self) -> usize {
        self.entries.values().filter(|s| s.is_loading()).count()
    }
}

/// One cache per resource, routed by payload variant.
#[derive(Debug, Default)]
pub struct Caches {
    pub accounts: FetchCache<Vec<Account>>,
    pub campaigns: FetchCache<Vec<Campaign>>,
    pub ad_groups: FetchCache<Vec<AdGroup>>,
    pub keywords: FetchCache<KeywordPage>,
}

impl Caches {
    /// Claim `key` in the matching cache. See [`FetchCache::begin`].
    pub fn begin(&mut self, key: &QueryKey, retry_failed: bool) -> bool {
        match key {
            QueryKey::Accounts => self.accounts.begin(key, retry_failed),
            QueryKey::Campaigns { .. } => self.campaigns.begin(key, retry_failed),
            QueryKey::AdGroups { .. } => self.ad_groups.begin(key, retry_failed),
            QueryKey::Keywords(_) => self.keywords.begin(key, retry_failed),
        }
    }

    /// Store a finished request. A payload whose variant does not match the
    /// key is recorded as a decode failure.
    pub fn complete(&mut self, key: QueryKey, result: Result<Payload, ApiError>) {
        match (&key, result) {
            (QueryKey::Accounts, Ok(Payload::Accounts(v))) => self.accounts.complete(key, Ok(v)),
            (QueryKey::Campaigns { .. }, Ok(Payload::Campaigns(v))) => {
                self.campaigns.complete(key, Ok(v))
            }
            (QueryKey::AdGroups { .. }, Ok(Payload::AdGroups(v))) => {
                self.ad_groups.complete(key, Ok(v))
            }
            (QueryKey::Keywords(_), Ok(Payload::Keywords(v))) => self.keywords.complete(key, Ok(v)),
            (_, Ok(_)) => {
                let err = ApiError::Decode(format!("payload does not match request {key}"));
                self.fail(key, err);
            }
            (_, Err(e)) => self.fail(key, e),
        }
    }

    fn fail(&mut self, key: QueryKey, err: ApiError) {
        match key {
            QueryKey::Accounts => self.accounts.complete(key, Err(err)),
            QueryKey::Campaigns { .. } => self.campaigns.complete(key, Err(err)),
            QueryKey::AdGroups { .. } => self.ad_groups.complete(key, Err(err)),
            QueryKey::Keywords(_) => self.keywords.complete(key, Err(err)),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.accounts.in_flight()
            + self.campaigns.in_flight()
            + self.ad_groups.in_flight()
            + self.keywords.in_flight()
    }
}
