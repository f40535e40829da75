//! Per-bookstore result presentation.
//!
//! [`ResultViewModel`] owns the last loaded [`SearchResponse`] and one
//! [`ViewState`] per bookstore. It answers row queries for a table with one
//! section per bookstore and turns expand/collapse taps into
//! [`RowEditScript`] values. It never touches a UI toolkit.

pub mod edit;
pub mod row;
pub mod state;

pub use edit::{RowEditScript, RowPath};
pub use row::{price_label, RowAction, RowContent, Selection};
pub use state::ViewState;

use ebooktw_api::{BookstoreResult, SearchResponse};

/// View state for one search's results.
#[derive(Debug, Clone, Default)]
pub struct ResultViewModel {
    response: Option<SearchResponse>,
    states: Vec<ViewState>,
}

impl ResultViewModel {
    /// A view model showing the loading placeholder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all state with `response`.
    pub fn load(&mut self, response: SearchResponse) {
        self.states = response.results.iter().map(ViewState::derive).collect();
        tracing::debug!(
            sections = self.states.len(),
            books = response.book_count(),
            "results loaded"
        );
        self.response = Some(response);
    }

    /// Drop loaded results and go back to the loading placeholder.
    pub fn reset(&mut self) {
        self.response = None;
        self.states.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.response.is_some()
    }

    /// The loaded response, if any.
    pub fn response(&self) -> Option<&SearchResponse> {
        self.response.as_ref()
    }

    /// Number of sections. Before a load there is a single loading section.
    pub fn section_count(&self) -> usize {
        match &self.response {
            Some(_) => self.states.len(),
            None => 1,
        }
    }

    /// Section title: the bookstore's display name.
    pub fn header(&self, section: usize) -> Option<&str> {
        self.result(section).map(|r| r.bookstore.display_name.as_str())
    }

    /// State of `section`, or `None` past the last section.
    pub fn state(&self, section: usize) -> Option<ViewState> {
        match &self.response {
            Some(_) => self.states.get(section).copied(),
            None => (section == 0).then_some(ViewState::Loading),
        }
    }

    /// The bookstore result shown in `section`.
    pub fn result(&self, section: usize) -> Option<&BookstoreResult> {
        self.response.as_ref()?.results.get(section)
    }

    /// Books of the bookstore in `section` (0 before a load).
    pub fn book_count(&self, section: usize) -> usize {
        self.result(section).map_or(0, |r| r.books.len())
    }

    /// Rows in `section`; 0 for a section that does not exist.
    pub fn row_count(&self, section: usize) -> usize {
        self.state(section)
            .map_or(0, |state| state.row_count(self.book_count(section)))
    }

    /// What `(section, row)` shows, or `None` when the path is out of range.
    pub fn row_content(&self, section: usize, row: usize) -> Option<RowContent<'_>> {
        let state = self.state(section)?;
        if row >= state.row_count(self.book_count(section)) {
            return None;
        }
        let Some(result) = self.result(section) else {
            return Some(RowContent::text(row::LOADING_TEXT));
        };
        let content = match state {
            ViewState::Loading => RowContent::text(row::LOADING_TEXT),
            ViewState::NoResult => RowContent::text(row::NO_RESULT_TEXT),
            ViewState::NotOnline => RowContent::text(row::NOT_ONLINE_TEXT),
            ViewState::NotOkay => RowContent::text(row::not_okay_text(&result.status)),
            ViewState::Collapsed if row == 0 => RowContent::Book(result.books.first()?),
            ViewState::Collapsed => RowContent::action(RowAction::ShowMore),
            ViewState::Expanded if row < result.books.len() => RowContent::Book(&result.books[row]),
            ViewState::Expanded => RowContent::action(RowAction::ShowLess),
        };
        Some(content)
    }

    /// Flip `section` between collapsed and expanded.
    ///
    /// `visible` holds the rows currently on screen; collapsing asks for a
    /// scroll to the section top when its first row is not among them.
    /// Placeholder sections and unknown sections yield an empty script.
    pub fn toggle(&mut self, section: usize, visible: &[RowPath]) -> RowEditScript {
        let book_count = self.book_count(section);
        let Some(state) = self.states.get_mut(section) else {
            return RowEditScript::empty(section);
        };
        let script = match *state {
            ViewState::Collapsed => {
                *state = ViewState::Expanded;
                RowEditScript::expand(section, book_count)
            }
            ViewState::Expanded => {
                *state = ViewState::Collapsed;
                let scroll = !visible.contains(&RowPath::new(section, 0));
                RowEditScript::collapse(section, book_count, scroll)
            }
            _ => return RowEditScript::empty(section),
        };
        tracing::debug!(section, state = %state, "section toggled");
        script
    }

    /// Handle a tap on `(section, row)`.
    pub fn select(&mut self, section: usize, row: usize, visible: &[RowPath]) -> Selection {
        let action = match self.row_content(section, row) {
            Some(RowContent::Book(book)) => return Selection::OpenLink(book.link.clone()),
            Some(RowContent::Placeholder { action, .. }) => action,
            None => None,
        };
        match action {
            Some(_) => Selection::Edit(self.toggle(section, visible)),
            None => Selection::None,
        }
    }
}
