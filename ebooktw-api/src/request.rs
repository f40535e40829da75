//! Outbound request construction.
//!
//! Keyword searches are `POST /v1/searches?q=...`; result-id lookups are
//! `GET /v1/searches/{id}`. Building a request performs no I/O.

use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::types::SearchParameter;
use reqwest::Method;
use url::Url;

/// Path of the search collection on the API host.
pub const SEARCHES_PATH: &str = "/v1/searches";

/// A fully-formed search request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub method: Method,
    pub url: Url,
}

/// Build the request for `parameter`.
///
/// When `use_dev_endpoint` is set the URL carries the configured dev port;
/// nothing else about the request changes.
///
/// # Errors
///
/// Returns [`SearchError::Build`] if the URL cannot be formed. This is a
/// configuration problem, never a condition worth retrying.
pub fn build_request(
    parameter: &SearchParameter,
    config: &ClientConfig,
    use_dev_endpoint: bool,
) -> Result<SearchRequest, SearchError> {
    let mut url = config.parsed_base_url()?;
    url.set_path(SEARCHES_PATH);
    url.set_query(None);
    url.set_fragment(None);
    if use_dev_endpoint {
        url.set_port(Some(config.dev_port))
            .map_err(|()| SearchError::Build(format!("cannot set port on {url}")))?;
    }

    let method = match parameter {
        SearchParameter::Keyword(keyword) => {
            url.set_query(Some(&format!("q={}", encode_query_value(keyword))));
            Method::POST
        }
        SearchParameter::ResultId(id) => {
            if id.is_empty() {
                return Err(SearchError::Build("result id is empty".into()));
            }
            match url.path_segments_mut() {
                Ok(mut segments) => {
                    segments.push(id);
                }
                Err(()) => {
                    return Err(SearchError::Build("base URL cannot carry a path".into()));
                }
            }
            Method::GET
        }
    };

    tracing::debug!(%method, path = url.path(), dev = use_dev_endpoint, "built search request");
    Ok(SearchRequest { method, url })
}

/// Percent-encode a query value so only ASCII letters, digits and `-._~`
/// stay literal. Space becomes `%20`, not `+`.
pub fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
