//! Dashboard configuration: TOML file plus environment overrides.
//!
//! Resolution order for each value: environment variable, then config file,
//! then built-in default. The API base URL has no default; a missing base URL
//! is a fatal startup error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const ENV_BASE_URL: &str = "ADLENS_API_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "ADLENS_LOG_LEVEL";
pub const CONFIG_FILE_NAME: &str = "adlens.toml";

/// Page sizes the backend accepts.
pub const ALLOWED_PAGE_SIZES: [u32; 2] = [10, 50];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL is not configured (set [api].base_url or ADLENS_API_BASE_URL)")]
    MissingBaseUrl,

    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("page size {0} is not supported (expected 10 or 50)")]
    InvalidPageSize(u32),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// On-disk shape of `adlens.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawConfig {
    pub api: RawApiConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Validated connection settings handed to the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }
}

/// Which dashboard variant to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Show the account selector and scope campaigns by account.
    pub account_tier: bool,
    /// Show the search box and sortable column headers.
    pub search_and_sort: bool,
    /// Rows per keyword page.
    pub page_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            account_tier: true,
            search_and_sort: true,
            page_size: 50,
        }
    }
}

impl LayoutConfig {
    /// Campaign-only variant: no account tier, no search or sort, 10 rows per page.
    pub fn compact() -> Self {
        Self {
            account_tier: false,
            search_and_sort: false,
            page_size: 10,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if ALLOWED_PAGE_SIZES.contains(&self.page_size) {
            Ok(())
        } else {
            Err(ConfigError::InvalidPageSize(self.page_size))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `adlens_core=debug`.
    pub level: String,
    /// Log file path. The TUI falls back to its data directory when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
    /// File the values were read from, if any.
    pub source: Option<PathBuf>,
}

impl DashboardConfig {
    /// Load configuration for a binary.
    ///
    /// Reads `.env` (if present), then the explicit `path` or the first
    /// default location that exists, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let source = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_locations().into_iter().find(|p| p.is_file()),
        };

        let raw = match &source {
            Some(p) => read_raw(p)?,
            None => RawConfig::default(),
        };

        let env_base = std::env::var(ENV_BASE_URL).ok();
        let env_level = std::env::var(ENV_LOG_LEVEL).ok();
        let mut config = Self::resolve(raw, env_base.as_deref(), env_level.as_deref())?;
        config.source = source;
        Ok(config)
    }

    /// Merge a parsed file with environment values and validate.
    pub fn resolve(
        raw: RawConfig,
        env_base_url: Option<&str>,
        env_log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = env_base_url
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or(raw.api.base_url)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut api = ApiConfig::new(&base_url)?;
        if let Some(secs) = raw.api.timeout_secs {
            api.timeout = Duration::from_secs(secs);
        }

        raw.layout.validate()?;

        let mut logging = raw.logging;
        if let Some(level) = env_log_level.filter(|s| !s.trim().is_empty()) {
            logging.level = level.to_string();
        }

        Ok(Self {
            api,
            layout: raw.layout,
            logging,
            source: None,
        })
    }
}

/// Candidate config file locations, in priority order.
pub fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("adlens").join(CONFIG_FILE_NAME));
    }
    paths
}

pub fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: "expected an http(s) URL".to_string(),
        });
    }
    Ok(url)
}
