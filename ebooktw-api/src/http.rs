//! Shared HTTP client construction.
//!
//! One [`reqwest::Client`] is built per [`crate::SearchClient`] and reused for
//! the search call and for thumbnail fetches made by the UI layer.

use crate::config::ClientConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for the search API.
///
/// The client has:
/// - the configured (or default) User-Agent
/// - a request timeout when `timeout_seconds > 0`
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Build`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SearchError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.effective_user_agent())
        .redirect(reqwest::redirect::Policy::limited(10));
    if config.timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
    }
    builder
        .build()
        .map_err(|e| SearchError::Build(format!("failed to build HTTP client: {e}")))
}
