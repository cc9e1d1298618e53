//! API endpoint configuration

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "CMS_API_URL";

/// Environment variable holding the API token
pub const API_TOKEN_ENV: &str = "CMS_API_TOKEN";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the remote API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, always ending in `/`
    pub base_url: Url,
    /// Token sent as `Authorization: Token <token>`
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build a config from a base URL string
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{base_url}': {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        // Url::join drops the last segment unless the path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Absolute URL for a path relative to the base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("invalid endpoint '{path}': {e}")))
    }
}
