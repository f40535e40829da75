//! Per-bookstore view state.

use ebooktw_api::BookstoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display state of one bookstore section.
///
/// Only [`ViewState::Collapsed`] and [`ViewState::Expanded`] change after a
/// load; every other state is terminal until the next search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewState {
    /// No response has arrived yet.
    Loading,
    /// First book plus a "show more" row.
    Collapsed,
    /// Every book plus a "show less" row.
    Expanded,
    /// Online, parsed fine, nothing found.
    NoResult,
    /// Disabled by the operator.
    NotOnline,
    /// Online, but the server failed to parse the store's page.
    NotOkay,
}

impl ViewState {
    /// Initial state for a freshly loaded result.
    ///
    /// Depends only on `(books.len(), bookstore.is_online, is_okay)`. A
    /// bookstore with books always starts [`ViewState::Collapsed`], even with
    /// a single book.
    pub fn derive(result: &BookstoreResult) -> Self {
        if !result.books.is_empty() {
            Self::Collapsed
        } else if !result.bookstore.is_online {
            Self::NotOnline
        } else if !result.is_okay {
            Self::NotOkay
        } else {
            Self::NoResult
        }
    }

    /// Whether the state shows a single placeholder row.
    pub fn is_placeholder(self) -> bool {
        !matches!(self, Self::Collapsed | Self::Expanded)
    }

    /// Rows the section shows for a store with `book_count` books.
    pub fn row_count(self, book_count: usize) -> usize {
        match self {
            Self::Loading | Self::NoResult | Self::NotOnline | Self::NotOkay => 1,
            Self::Collapsed => 2,
            Self::Expanded => book_count + 1,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loading => "loading",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
            Self::NoResult => "no result",
            Self::NotOnline => "not online",
            Self::NotOkay => "not okay",
        };
        f.write_str(name)
    }
}
