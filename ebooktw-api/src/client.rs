//! HTTP search client and response classification.
//!
//! [`SearchClient::search`] sends one request and hands the raw status and
//! body to [`interpret_response`], which decides deterministically between a
//! decoded [`SearchResponse`] and a [`SearchError`].

use crate::backend::SearchBackend;
use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::http;
use crate::request::{build_request, SearchRequest};
use crate::types::{ErrorBody, SearchParameter, SearchResponse};
use serde_json::error::Category;
use url::Url;

/// Message for an empty response body.
pub const NO_DATA: &str = "No data";

/// Client for the multi-bookstore search API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl SearchClient {
    /// Create a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] if the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let http = http::build_client(&config)?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying HTTP client, shared with thumbnail fetches.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build the request for `parameter` against this client's host.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] if the URL cannot be formed.
    pub fn build_request(
        &self,
        parameter: &SearchParameter,
        use_dev_endpoint: bool,
    ) -> Result<SearchRequest, SearchError> {
        build_request(parameter, &self.config, use_dev_endpoint)
    }

    /// Web front-end link for `parameter`, for sharing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] if the configured share base is unusable.
    pub fn share_url(&self, parameter: &SearchParameter) -> Result<Url, SearchError> {
        let base = self.config.parsed_share_base_url()?;
        Ok(crate::parameter::share_url(parameter, &base))
    }

    /// Send one search and classify the outcome. Never retries.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Build`] if the request cannot be formed
    /// - [`SearchError::Transport`] on network failure or an empty body
    /// - otherwise as described on [`interpret_response`]
    pub async fn search(
        &self,
        parameter: &SearchParameter,
        use_dev_endpoint: bool,
        verbose: bool,
    ) -> Result<SearchResponse, SearchError> {
        let request = self.build_request(parameter, use_dev_endpoint)?;
        tracing::trace!(url = %request.url, "search request");

        let response = self
            .http
            .request(request.method, request.url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "search response received");

        let outcome = interpret_response(parameter, status, &body, verbose);
        match &outcome {
            Ok(response) => tracing::debug!(
                bookstores = response.results.len(),
                books = response.book_count(),
                "search decoded"
            ),
            Err(err) => tracing::warn!(error = %err, status, "search failed"),
        }
        outcome
    }
}

impl SearchBackend for SearchClient {
    async fn search(
        &self,
        parameter: &SearchParameter,
        use_dev_endpoint: bool,
        verbose: bool,
    ) -> Result<SearchResponse, SearchError> {
        SearchClient::search(self, parameter, use_dev_endpoint, verbose).await
    }
}

/// Classify a received HTTP response. Pure; no I/O.
///
/// Order of checks:
///
/// 1. With `verbose`, a status outside 200-299 becomes
///    [`SearchError::HttpStatus`] with `HTTP Error {status}` followed by the
///    server's message, `Not error message`, or `No data`.
///    Without `verbose` the status is ignored, so a non-2xx response whose
///    body is still a valid [`SearchResponse`] succeeds.
/// 2. An empty body is [`SearchError::Transport`] (`No data`).
/// 3. A body that decodes as [`SearchResponse`] succeeds.
/// 4. Otherwise a body that decodes as [`ErrorBody`] is
///    [`SearchError::Server`] with the server's message.
/// 5. Otherwise [`SearchError::Schema`]: the specific violation when
///    `verbose`, else a generic message that depends on whether `parameter`
///    was a keyword or a result id.
pub fn interpret_response(
    parameter: &SearchParameter,
    status: u16,
    body: &[u8],
    verbose: bool,
) -> Result<SearchResponse, SearchError> {
    if verbose && !(200..300).contains(&status) {
        let detail = if body.is_empty() {
            NO_DATA.to_string()
        } else {
            match serde_json::from_slice::<ErrorBody>(body) {
                Ok(error_body) => error_body.message,
                Err(_) => "Not error message".to_string(),
            }
        };
        return Err(SearchError::HttpStatus {
            status,
            message: format!("HTTP Error {status}\n{detail}"),
        });
    }

    if body.is_empty() {
        return Err(SearchError::Transport(NO_DATA.into()));
    }

    let decode_error = match serde_json::from_slice::<SearchResponse>(body) {
        Ok(response) => return Ok(response),
        Err(e) => e,
    };

    if let Ok(error_body) = serde_json::from_slice::<ErrorBody>(body) {
        return Err(SearchError::Server(error_body.message));
    }

    if verbose {
        let violation = SchemaViolation::classify(&decode_error);
        return Err(SearchError::Schema(format!(
            "{}: {decode_error}",
            violation.label()
        )));
    }

    Err(SearchError::Schema(generic_failure_message(parameter)))
}

/// User-facing message for an undecodable response outside verbose mode.
pub fn generic_failure_message(parameter: &SearchParameter) -> String {
    match parameter {
        SearchParameter::Keyword(keyword) => {
            format!("搜尋「{keyword}」時發生錯誤。麻煩回報給開發者，謝謝！")
        }
        SearchParameter::ResultId(_) => "搜尋連結無法使用".to_string(),
    }
}

/// How a response body violated the expected schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaViolation {
    /// A required key is absent.
    KeyNotFound,
    /// A value has the wrong JSON type.
    TypeMismatch,
    /// A required value is `null`.
    ValueNotFound,
    /// The body is not well-formed JSON or is otherwise unusable.
    DataCorrupted,
}

impl SchemaViolation {
    /// Classify a `serde_json` decode failure.
    pub fn classify(error: &serde_json::Error) -> Self {
        match error.classify() {
            Category::Data => {
                let message = error.to_string();
                if message.starts_with("missing field") {
                    Self::KeyNotFound
                } else if message.starts_with("invalid type: null") {
                    Self::ValueNotFound
                } else if message.starts_with("invalid type") {
                    Self::TypeMismatch
                } else {
                    Self::DataCorrupted
                }
            }
            Category::Syntax | Category::Eof | Category::Io => Self::DataCorrupted,
        }
    }

    /// Diagnostic prefix used in verbose messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::KeyNotFound => "key not found",
            Self::TypeMismatch => "type mismatch",
            Self::ValueNotFound => "value not found",
            Self::DataCorrupted => "data corrupted",
        }
    }
}
