//! # ebooktw-api
//!
//! Client for the `ebook.yuer.tw` search API, which searches many Taiwanese
//! e-book stores at once and returns one result block per bookstore.
//!
//! ## Design
//!
//! - [`request::build_request`] turns a keyword or result id into a request
//! - [`parameter::parse_search_url`] turns an inbound share link into a
//!   [`SearchParameter`]
//! - [`SearchClient`] sends the request; [`client::interpret_response`]
//!   classifies the reply into a [`SearchResponse`] or a [`SearchError`]
//! - No retries: each call yields exactly one outcome, and retry policy
//!   belongs to the caller
//!
//! ## Privacy
//!
//! Search keywords are logged only at trace level.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod parameter;
pub mod request;
pub mod types;

pub use backend::SearchBackend;
pub use client::{interpret_response, SearchClient};
pub use config::ClientConfig;
pub use error::{DeepLinkError, Result, SearchError};
pub use parameter::{parse_search_link, parse_search_url, share_url};
pub use request::{build_request, SearchRequest};
pub use types::{Book, Bookstore, BookstoreResult, ErrorBody, SearchParameter, SearchResponse};

/// Search the production API with default configuration.
///
/// Convenience wrapper around [`SearchClient::search`] using
/// [`ClientConfig::default()`] and non-verbose errors.
///
/// # Errors
///
/// Same as [`SearchClient::search`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> ebooktw_api::Result<()> {
/// let parameter = ebooktw_api::SearchParameter::Keyword("三體".into());
/// let response = ebooktw_api::search_default(&parameter).await?;
/// for result in &response.results {
///     println!("{}: {} books", result.bookstore, result.books.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_default(parameter: &SearchParameter) -> Result<SearchResponse> {
    let client = SearchClient::new(ClientConfig::default())?;
    client.search(parameter, false, false).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_builds() {
        assert!(SearchClient::new(ClientConfig::default()).is_ok());
    }

    #[test]
    fn client_share_url_uses_configured_front_end() {
        let config = ClientConfig {
            share_base_url: "https://front.example".into(),
            ..Default::default()
        };
        let client = SearchClient::new(config).expect("valid config");
        let url = client
            .share_url(&SearchParameter::Keyword("沙丘".into()))
            .expect("share url");
        assert_eq!(url.as_str(), "https://front.example/search?q=%E6%B2%99%E4%B8%98");
        assert_eq!(
            parse_search_url(&url),
            Ok(SearchParameter::Keyword("沙丘".into()))
        );
    }

    #[tokio::test]
    async fn search_default_rejects_empty_result_id() {
        let err = search_default(&SearchParameter::ResultId(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Build(_)));
    }
}
