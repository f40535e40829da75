//! Error types for the ebooktw application layer.

use ebooktw_api::{DeepLinkError, SearchError};

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration load/save/validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Search history storage error.
    #[error("history error: {0}")]
    History(String),

    /// Thumbnail fetch error.
    #[error("thumbnail error: {0}")]
    Thumbnail(String),

    /// A search failed. Displayed without a prefix so the server's or
    /// client's message reaches the user verbatim.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// An inbound link could not be turned into a search.
    #[error("unsupported link: {0}")]
    DeepLink(#[from] DeepLinkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
