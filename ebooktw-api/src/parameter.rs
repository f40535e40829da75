//! Inbound deep-link parsing.
//!
//! Shared and universal links use the web front-end's paths:
//!
//! | Path | Query | Result |
//! |------|-------|--------|
//! | `/search/{id}`, `/searches/{id}` | none | [`SearchParameter::ResultId`] |
//! | `/search`, `/searches` | `q=...` | [`SearchParameter::Keyword`] |
//!
//! `/search` is the legacy v0.1 web path, `/searches` the v1 one.
//!
//! [`share_url`] builds the web front-end link for a parameter; parsing it
//! gives the parameter back.

use crate::error::DeepLinkError;
use crate::types::SearchParameter;
use url::Url;

const RESULT_ID_PREFIXES: [&str; 2] = ["/searches/", "/search/"];
const KEYWORD_PATHS: [&str; 2] = ["/search", "/searches"];

/// Web front-end that shared links point at.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://taiwan-ebook-lover.github.io";

/// Link to `parameter` on the web front-end at `base`.
///
/// Keywords become `/search?q=...`, result ids `/searches/{id}`. Any path,
/// query or fragment on `base` is replaced.
pub fn share_url(parameter: &SearchParameter, base: &Url) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    match parameter {
        SearchParameter::Keyword(keyword) => {
            url.set_path("/search");
            url.set_query(Some(&format!("q={}", urlencoding::encode(keyword))));
        }
        SearchParameter::ResultId(id) => {
            url.set_path(&format!("/searches/{}", urlencoding::encode(id)));
            url.set_query(None);
        }
    }
    url
}

/// Parse a link string into a search parameter.
///
/// # Errors
///
/// Returns [`DeepLinkError`] if the string is not a URL or
/// [`parse_search_url`] rejects it.
pub fn parse_search_link(link: &str) -> Result<SearchParameter, DeepLinkError> {
    let url = Url::parse(link).map_err(|e| DeepLinkError::new(format!("invalid URL: {e}")))?;
    parse_search_url(&url)
}

/// Map a deep-link URL to a search parameter. Pure; no network access.
///
/// # Errors
///
/// - `"No query"` for a keyword path without a query string
/// - `"No search keyword"` when the query has no `q` value; an empty
///   `q=` is an empty keyword
/// - `"{path} not supported"` for any other path
pub fn parse_search_url(url: &Url) -> Result<SearchParameter, DeepLinkError> {
    let path = url.path();

    if url.query().is_none() {
        for prefix in RESULT_ID_PREFIXES {
            if let Some(rest) = path.strip_prefix(prefix) {
                if rest.is_empty() {
                    continue;
                }
                if rest.contains('/') {
                    return Err(DeepLinkError::new(format!("{path} not supported")));
                }
                let id = urlencoding::decode(rest)
                    .map_err(|e| DeepLinkError::new(format!("invalid result id: {e}")))?;
                return Ok(SearchParameter::ResultId(id.into_owned()));
            }
        }
    }

    if !KEYWORD_PATHS.contains(&path) {
        return Err(DeepLinkError::new(format!("{path} not supported")));
    }

    let query = url.query().ok_or_else(|| DeepLinkError::new("No query"))?;
    query_value(query, "q")
        .map(SearchParameter::Keyword)
        .ok_or_else(|| DeepLinkError::new("No search keyword"))
}

/// First value of `name` in a raw query string, percent-decoded.
///
/// `+` is kept literally: links are built with RFC 3986 encoding, not
/// HTML form encoding. Items without `=` carry no value and are skipped.
fn query_value(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|item| item.split_once('='))
        .filter(|(key, _)| *key == name)
        .find_map(|(_, value)| urlencoding::decode(value).ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(link: &str) -> Result<SearchParameter, DeepLinkError> {
        parse_search_link(link)
    }

    #[test]
    fn four_supported_shapes() {
        assert_eq!(
            parse("https://ebook.yuer.tw/search/123"),
            Ok(SearchParameter::ResultId("123".into()))
        );
        assert_eq!(
            parse("https://ebook.yuer.tw/searches/456"),
            Ok(SearchParameter::ResultId("456".into()))
        );
        assert_eq!(
            parse("https://ebook.yuer.tw/search?q=abc"),
            Ok(SearchParameter::Keyword("abc".into()))
        );
        assert_eq!(
            parse("https://ebook.yuer.tw/searches?q=xyz"),
            Ok(SearchParameter::Keyword("xyz".into()))
        );
    }

    #[test]
    fn keyword_is_percent_decoded() {
        assert_eq!(
            parse("https://ebook.yuer.tw/searches?q=%E4%B8%89%E9%AB%94%20II"),
            Ok(SearchParameter::Keyword("三體 II".into()))
        );
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(
            parse("https://ebook.yuer.tw/searches?q=c++"),
            Ok(SearchParameter::Keyword("c++".into()))
        );
    }

    #[test]
    fn q_found_among_other_parameters() {
        assert_eq!(
            parse("https://ebook.yuer.tw/search?utm_source=x&q=abc&q=ignored"),
            Ok(SearchParameter::Keyword("abc".into()))
        );
    }

    #[test]
    fn unsupported_path_is_named() {
        let err = parse("https://ebook.yuer.tw/books/1").unwrap_err();
        assert_eq!(err.message, "/books/1 not supported");
        let err = parse("https://ebook.yuer.tw/").unwrap_err();
        assert_eq!(err.message, "/ not supported");
    }

    #[test]
    fn result_id_path_with_query_is_rejected() {
        let err = parse("https://ebook.yuer.tw/search/123?q=abc").unwrap_err();
        assert_eq!(err.message, "/search/123 not supported");
    }

    #[test]
    fn trailing_slash_without_id_is_rejected() {
        let err = parse("https://ebook.yuer.tw/searches/").unwrap_err();
        assert!(err.message.contains("not supported"));
    }

    #[test]
    fn keyword_path_without_query() {
        let err = parse("https://ebook.yuer.tw/searches").unwrap_err();
        assert_eq!(err.message, "No query");
    }

    #[test]
    fn query_without_q() {
        let err = parse("https://ebook.yuer.tw/searches?keyword=abc").unwrap_err();
        assert_eq!(err.message, "No search keyword");
        let err = parse("https://ebook.yuer.tw/searches?q").unwrap_err();
        assert_eq!(err.message, "No search keyword");
    }

    #[test]
    fn empty_q_is_empty_keyword() {
        assert_eq!(
            parse("https://ebook.yuer.tw/searches?q="),
            Ok(SearchParameter::Keyword(String::new()))
        );
    }

    #[test]
    fn nested_result_id_is_rejected() {
        let err = parse("https://ebook.yuer.tw/search/123/456").unwrap_err();
        assert_eq!(err.message, "/search/123/456 not supported");
        let err = parse("https://ebook.yuer.tw/searches/a/b/").unwrap_err();
        assert!(err.message.contains("not supported"));
    }

    fn share_base() -> Url {
        Url::parse(DEFAULT_SHARE_BASE_URL).expect("default share base parses")
    }

    #[test]
    fn share_url_for_keyword() {
        let url = share_url(&SearchParameter::Keyword("三體 II".into()), &share_base());
        assert_eq!(
            url.as_str(),
            "https://taiwan-ebook-lover.github.io/search?q=%E4%B8%89%E9%AB%94%20II"
        );
    }

    #[test]
    fn share_url_for_result_id() {
        let url = share_url(&SearchParameter::ResultId("r-42".into()), &share_base());
        assert_eq!(url.as_str(), "https://taiwan-ebook-lover.github.io/searches/r-42");
    }

    #[test]
    fn share_links_parse_back() {
        let base = Url::parse("https://front.example/ignored/path?x=1#frag").expect("base");
        for parameter in [
            SearchParameter::Keyword("三體".into()),
            SearchParameter::Keyword("a&b=c d+e".into()),
            SearchParameter::Keyword(String::new()),
            SearchParameter::ResultId("123".into()),
            SearchParameter::ResultId("a b".into()),
        ] {
            let url = share_url(&parameter, &base);
            assert_eq!(parse_search_url(&url), Ok(parameter), "{url}");
        }
    }

    #[test]
    fn not_a_url() {
        let err = parse("not a url").unwrap_err();
        assert!(err.message.starts_with("invalid URL"));
    }
}
