//! Trait seam between search callers and the HTTP client.
//!
//! [`crate::SearchClient`] is the production implementation. Callers that
//! orchestrate searches (session state, CLI) are generic over
//! [`SearchBackend`] so they can be driven by scripted backends in tests.

use crate::error::SearchError;
use crate::types::{SearchParameter, SearchResponse};

/// Something that can resolve a [`SearchParameter`] into a response.
///
/// Implementations never retry internally; each call yields exactly one
/// outcome. All implementations must be `Send + Sync` so a search can run
/// on a spawned task.
pub trait SearchBackend: Send + Sync {
    /// Perform one search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] classified as described on
    /// [`crate::client::interpret_response`].
    fn search(
        &self,
        parameter: &SearchParameter,
        use_dev_endpoint: bool,
        verbose: bool,
    ) -> impl std::future::Future<Output = Result<SearchResponse, SearchError>> + Send;
}
