//! Blocking HTTP client for the dashboard backend.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::provider::{decode_body, ApiError, DashboardApi};
use crate::config::{ApiConfig, ConfigError};
use crate::domain::{Account, AccountId, AdGroup, Campaign, CampaignId, KeywordPage};
use crate::query::{KeywordQuery, QueryKey};

/// `DashboardApi` over `reqwest::blocking`. One GET per call, no retries.
pub struct HttpApi {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("adlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a path produced by `QueryKey::path`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<T, ApiError> {
        let path = key.path();
        let url = self.url_for(&path);
        debug!(%url, "GET");

        let resp = self.client.get(&url).send().map_err(|e| {
            warn!(%url, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "non-success status");
            return Err(ApiError::Status {
                code: status.as_u16(),
                path,
            });
        }

        let body = resp.text().map_err(|e| ApiError::Network(e.to_string()))?;
        decode_body(&body).map_err(|e| {
            warn!(%url, error = %e, "undecodable body");
            e
        })
    }
}

impl DashboardApi for HttpApi {
    fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get(&QueryKey::Accounts)
    }

    fn campaigns(&self, account: Option<AccountId>) -> Result<Vec<Campaign>, ApiError> {
        self.get(&QueryKey::Campaigns { account })
    }

    fn ad_groups(&self, campaign: CampaignId) -> Result<Vec<AdGroup>, ApiError> {
        self.get(&QueryKey::AdGroups { campaign })
    }

    fn keywords(&self, query: &KeywordQuery) -> Result<KeywordPage, ApiError> {
        self.get(&QueryKey::Keywords(query.clone()))
    }
}
