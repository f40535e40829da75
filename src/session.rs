//! Search lifecycle: one search in flight, stale replies dropped.
//!
//! A [`SearchSession`] owns the [`ResultViewModel`]. Starting a search bumps
//! a generation counter and hands out a [`SearchTicket`]; a reply is applied
//! only if its ticket still carries the current generation. Network work runs
//! on spawned tasks ([`spawn_search`]) and reports back over an mpsc channel,
//! so the view model is only ever mutated by the task that owns the session.

use crate::history::HistoryStore;
use crate::results::ResultViewModel;
use crate::settings::SettingsProvider;
use ebooktw_api::{SearchBackend, SearchError, SearchParameter, SearchResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one started search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub parameter: SearchParameter,
}

/// What the user may do after a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOption {
    /// Run the same search again.
    Retry,
    /// Search the keyword through the web-scraping fallback.
    SwitchToLegacy,
    /// Dismiss the error.
    Cancel,
}

impl RecoveryOption {
    pub fn label(self) -> &'static str {
        match self {
            Self::Retry => "重試",
            Self::SwitchToLegacy => "使用舊版搜尋",
            Self::Cancel => "取消",
        }
    }
}

/// Result of handing a reply to [`SearchSession::complete`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A newer search has started since; the reply was discarded.
    Stale,
    /// The view model now shows the reply.
    Loaded,
    /// The search failed; the view model still shows the loading state.
    Failed {
        error: SearchError,
        recovery: Vec<RecoveryOption>,
    },
}

/// Where a search should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoute {
    /// The aggregation API.
    Api,
    /// The web-scraping fallback, with the keyword to search.
    Legacy(String),
}

/// Message sent from a search task back to the session owner.
#[derive(Debug)]
pub enum SearchEvent {
    Completed {
        ticket: SearchTicket,
        result: Result<SearchResponse, SearchError>,
    },
}

/// Decide where `parameter` is searched. Result links always use the API.
pub fn route(parameter: &SearchParameter, settings: &dyn SettingsProvider) -> SearchRoute {
    match parameter {
        SearchParameter::Keyword(keyword) if settings.legacy_mode_enabled() => {
            SearchRoute::Legacy(keyword.clone())
        }
        _ => SearchRoute::Api,
    }
}

/// Choices offered after `error` for a search of `parameter`.
pub fn recovery_options(parameter: &SearchParameter, error: &SearchError) -> Vec<RecoveryOption> {
    let mut options = Vec::with_capacity(3);
    if error.is_retryable() {
        options.push(RecoveryOption::Retry);
    }
    if parameter.keyword().is_some() {
        options.push(RecoveryOption::SwitchToLegacy);
    }
    options.push(RecoveryOption::Cancel);
    options
}

/// One line listing `options` for the user, e.g. `(重試 / 取消)`.
pub fn recovery_prompt(options: &[RecoveryOption]) -> String {
    let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
    format!("({})", labels.join(" / "))
}

/// Turn an inbound share link into the search it names.
///
/// # Errors
///
/// Returns [`crate::AppError::DeepLink`] for links the app does not handle.
pub fn open_link(link: &str) -> crate::Result<SearchParameter> {
    Ok(ebooktw_api::parse_search_link(link)?)
}

/// Owner of the result view model for a sequence of searches.
pub struct SearchSession<H: HistoryStore> {
    generation: u64,
    current: Option<SearchParameter>,
    view: ResultViewModel,
    history: H,
}

impl<H: HistoryStore> SearchSession<H> {
    pub fn new(history: H) -> Self {
        Self {
            generation: 0,
            current: None,
            view: ResultViewModel::new(),
            history,
        }
    }

    /// Start a search for `parameter`.
    ///
    /// Any search still in flight becomes stale. The view model goes back to
    /// the loading placeholder and keyword searches are recorded in history.
    pub fn begin(&mut self, parameter: SearchParameter) -> SearchTicket {
        self.generation += 1;
        self.view.reset();
        if let Some(keyword) = parameter.keyword() {
            if let Err(e) = self.history.add(keyword) {
                tracing::warn!("failed to record search history: {e}");
            }
            tracing::trace!(keyword, "search started");
        }
        tracing::debug!(generation = self.generation, "search begun");
        self.current = Some(parameter.clone());
        SearchTicket {
            generation: self.generation,
            parameter,
        }
    }

    /// Apply the reply for `ticket`.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, SearchError>,
    ) -> SearchOutcome {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale search response"
            );
            return SearchOutcome::Stale;
        }
        match result {
            Ok(response) => {
                self.view.load(response);
                SearchOutcome::Loaded
            }
            Err(error) => {
                tracing::warn!(
                    retryable = error.is_retryable(),
                    "search failed: {}",
                    error.message()
                );
                let recovery = recovery_options(&ticket.parameter, &error);
                SearchOutcome::Failed { error, recovery }
            }
        }
    }

    /// Abandon the search in flight. Its reply will be discarded.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    /// Whether a reply for `ticket` would still be applied.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// The parameter of the latest search, unless it was cancelled.
    pub fn current(&self) -> Option<&SearchParameter> {
        self.current.as_ref()
    }

    pub fn view(&self) -> &ResultViewModel {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ResultViewModel {
        &mut self.view
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}

/// Run the search for `ticket` on a new task and report the reply on `tx`.
///
/// Settings are read once, before the task starts. If the receiver is gone
/// the reply is dropped.
pub fn spawn_search<B>(
    backend: Arc<B>,
    ticket: SearchTicket,
    settings: &dyn SettingsProvider,
    tx: mpsc::Sender<SearchEvent>,
) -> JoinHandle<()>
where
    B: SearchBackend + 'static,
{
    let use_dev_endpoint = settings.use_dev_endpoint();
    let verbose = settings.verbose_errors();
    tokio::spawn(async move {
        let result = backend
            .search(&ticket.parameter, use_dev_endpoint, verbose)
            .await;
        if tx.send(SearchEvent::Completed { ticket, result }).await.is_err() {
            tracing::debug!("search receiver dropped; reply discarded");
        }
    })
}
