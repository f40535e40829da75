//! Wire-format types for the search API.
//!
//! Field names follow the server's camelCase JSON. All types are plain
//! values; a response is decoded once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One e-book offered by a bookstore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Cover thumbnail URL.
    pub thumbnail: String,
    pub title: String,
    /// Product page URL at the bookstore.
    pub link: String,
    /// ISO currency code, e.g. `TWD`.
    pub price_currency: String,
    /// Upstream data is sometimes incomplete, so the price may be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// An e-book retailer integrated as a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookstore {
    /// Stable key, unique within one response.
    pub id: String,
    /// Name shown as the section header.
    pub display_name: String,
    /// Operator-controlled kill switch. Independent of search success.
    pub is_online: bool,
}

impl fmt::Display for Bookstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Search outcome for one bookstore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookstoreResult {
    pub bookstore: Bookstore,
    /// Ordered by relevance as returned by the server.
    pub books: Vec<Book>,
    /// Whether the server managed to parse this bookstore's results.
    pub is_okay: bool,
    /// Diagnostic message, meaningful only when `is_okay` is false.
    pub status: String,
}

/// A complete multi-bookstore search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// One entry per bookstore, in display order.
    pub results: Vec<BookstoreResult>,
    /// The search string echoed back by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Opaque identifier for re-fetching this exact result set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SearchResponse {
    /// Total number of books across all bookstores.
    pub fn book_count(&self) -> usize {
        self.results.iter().map(|r| r.books.len()).sum()
    }
}

/// Structured error payload returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// What to search for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchParameter {
    /// Free-text title search.
    Keyword(String),
    /// Re-fetch a previously computed result set.
    ResultId(String),
}

impl SearchParameter {
    /// The keyword, if this is a keyword search.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            Self::ResultId(_) => None,
        }
    }
}

impl fmt::Display for SearchParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "keyword \"{k}\""),
            Self::ResultId(id) => write!(f, "result {id}"),
        }
    }
}
