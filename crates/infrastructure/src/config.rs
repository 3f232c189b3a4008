//! Suite configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Public placeholder API checked by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default fixture file name.
///
/// `FileFixtureSource` reads relative paths from the working directory; the
/// suite's `api_setup` anchors this default to the suite crate instead.
pub const DEFAULT_FIXTURE_PATH: &str = "test_data.json";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "POSTPROBE_BASE_URL";
/// Environment variable overriding the fixture path.
pub const FIXTURE_PATH_VAR: &str = "POSTPROBE_FIXTURE_PATH";
/// Environment variable setting a client-side request timeout.
pub const TIMEOUT_VAR: &str = "POSTPROBE_TIMEOUT_MS";

/// Invalid configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is not an absolute http(s) URL.
    #[error("POSTPROBE_BASE_URL is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    /// The timeout is not a positive integer.
    #[error("POSTPROBE_TIMEOUT_MS must be a positive number of milliseconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Settings shared by every case in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Location of the fixture file.
    pub fixture_path: PathBuf,
    /// Optional client-side timeout; unset means requests run to completion.
    pub timeout_ms: Option<u64>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            timeout_ms: None,
        }
    }
}

impl SuiteConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_url) = get(BASE_URL_VAR) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(path) = get(FIXTURE_PATH_VAR) {
            config.fixture_path = PathBuf::from(path);
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let timeout = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout_ms = Some(timeout);
        }

        Ok(config)
    }

    /// Replaces the base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Replaces the fixture path.
    #[must_use]
    pub fn with_fixture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = path.into();
        self
    }
}
