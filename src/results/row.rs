//! What a row shows and what selecting it does.

use super::edit::RowEditScript;
use ebooktw_api::Book;

pub const LOADING_TEXT: &str = "搜尋中...";
pub const NO_RESULT_TEXT: &str = "無搜尋結果";
pub const NOT_ONLINE_TEXT: &str = "暫時停用";
pub const SHOW_MORE_TEXT: &str = "顯示更多";
pub const SHOW_LESS_TEXT: &str = "收合結果";

/// Placeholder text for a store whose page the server failed to parse.
pub fn not_okay_text(status: &str) -> String {
    format!("搜尋失敗：{status}")
}

/// The action row at the end of a non-placeholder section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ShowMore,
    ShowLess,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShowMore => SHOW_MORE_TEXT,
            Self::ShowLess => SHOW_LESS_TEXT,
        }
    }
}

/// Content of one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowContent<'a> {
    /// Placeholder text. `action` is set for the "show more" / "show less"
    /// rows, which toggle the section when selected.
    Placeholder {
        text: String,
        action: Option<RowAction>,
    },
    /// A book.
    Book(&'a Book),
}

impl<'a> RowContent<'a> {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self::Placeholder {
            text: text.into(),
            action: None,
        }
    }

    pub(crate) fn action(action: RowAction) -> Self {
        Self::Placeholder {
            text: action.label().to_string(),
            action: Some(action),
        }
    }

    /// The book, if this is a book row.
    pub fn book(&self) -> Option<&'a Book> {
        match self {
            Self::Book(book) => Some(*book),
            Self::Placeholder { .. } => None,
        }
    }

    /// Text of a placeholder row.
    pub fn placeholder_text(&self) -> Option<&str> {
        match self {
            Self::Placeholder { text, .. } => Some(text),
            Self::Book(_) => None,
        }
    }
}

/// What the presentation layer should do after a row is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing: a placeholder row or an out-of-range path.
    None,
    /// Apply this edit to the table.
    Edit(RowEditScript),
    /// Open the book's product page.
    OpenLink(String),
}

/// Price line for a book row: `"280 TWD"`, or the currency alone when the
/// price is missing.
pub fn price_label(book: &Book) -> String {
    match book.price {
        Some(price) => format!("{price:.0} {}", book.price_currency),
        None => book.price_currency.clone(),
    }
}
