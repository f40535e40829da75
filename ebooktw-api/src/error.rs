//! Error types for the ebooktw-api crate.
//!
//! Every variant carries the exact message a consuming UI should show, so
//! `Display` is the message itself with no prefix. The variant records which
//! failure class produced it.

/// A failed search attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Network or connection failure, or a response with no body.
    /// Always worth retrying.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx HTTP status. Only produced when verbose errors are enabled.
    #[error("{message}")]
    HttpStatus {
        /// The HTTP status code returned by the server.
        status: u16,
        /// Formatted `HTTP Error {status}\n...` message.
        message: String,
    },

    /// The server reported a problem through a structured error body.
    /// The message is server-authored and shown verbatim.
    #[error("{0}")]
    Server(String),

    /// The response body did not match the expected schema.
    #[error("{0}")]
    Schema(String),

    /// The request could not be constructed. A local configuration error.
    #[error("{0}")]
    Build(String),
}

impl SearchError {
    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(m) | Self::Server(m) | Self::Schema(m) | Self::Build(m) => m,
            Self::HttpStatus { message, .. } => message,
        }
    }

    /// Whether offering the user a retry makes sense for this failure.
    ///
    /// Transport and HTTP status failures are transient. Structured server
    /// errors may be, so they are retryable too. Schema and build errors
    /// will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Server(_)
        )
    }
}

/// Failure to turn an inbound link into a search parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DeepLinkError {
    /// Human-readable reason.
    pub message: String,
}

impl DeepLinkError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Convenience type alias for ebooktw-api results.
pub type Result<T> = std::result::Result<T, SearchError>;
