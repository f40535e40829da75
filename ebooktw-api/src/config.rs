//! Client configuration with sensible defaults.
//!
//! Host, pre-production port and User-Agent are all explicit, so a client
//! can be pointed at a mock server.

use crate::error::SearchError;
use crate::parameter::DEFAULT_SHARE_BASE_URL;
use url::Url;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://ebook.yuer.tw";

/// Port of the pre-production API on the same host.
pub const DEFAULT_DEV_PORT: u16 = 8443;

/// Configuration for a [`crate::SearchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the API. Any path is ignored.
    pub base_url: String,
    /// Port used when a search asks for the dev endpoint.
    pub dev_port: u16,
    /// User-Agent header. If `None`, [`default_user_agent`] is used.
    pub user_agent: Option<String>,
    /// HTTP request timeout in seconds. `0` leaves the HTTP client default.
    pub timeout_seconds: u64,
    /// Web front-end that share links point at.
    pub share_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dev_port: DEFAULT_DEV_PORT,
            user_agent: None,
            timeout_seconds: 0,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Point the client at a different base URL (mock servers, staging hosts).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse [`Self::base_url`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] if it is not a valid URL.
    pub fn parsed_base_url(&self) -> Result<Url, SearchError> {
        Url::parse(&self.base_url)
            .map_err(|e| SearchError::Build(format!("invalid base URL {}: {e}", self.base_url)))
    }

    /// Parse [`Self::share_base_url`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] if it is not a URL with a host.
    pub fn parsed_share_base_url(&self) -> Result<Url, SearchError> {
        let url = Url::parse(&self.share_base_url).map_err(|e| {
            SearchError::Build(format!("invalid share base URL {}: {e}", self.share_base_url))
        })?;
        if url.host_str().is_none() {
            return Err(SearchError::Build("share base URL has no host".into()));
        }
        Ok(url)
    }

    /// Override the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The User-Agent this configuration sends.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(default_user_agent)
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - the base URL parses and has a host
    /// - the scheme is `https`, except for loopback hosts used in tests
    /// - `dev_port` is non-zero
    /// - the share base URL parses and has a host
    pub fn validate(&self) -> Result<(), SearchError> {
        let base = self.parsed_base_url()?;
        let host = base
            .host_str()
            .ok_or_else(|| SearchError::Build("base URL has no host".into()))?;
        let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");
        if base.scheme() != "https" && !loopback {
            return Err(SearchError::Build(format!(
                "base URL must use https, got {}",
                base.scheme()
            )));
        }
        if self.dev_port == 0 {
            return Err(SearchError::Build("dev_port must be greater than 0".into()));
        }
        self.parsed_share_base_url()?;
        Ok(())
    }
}

/// `EbookTW/{version} ({os}; {arch})`.
pub fn default_user_agent() -> String {
    format!(
        "EbookTW/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
