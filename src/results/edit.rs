//! Framework-neutral row edits.
//!
//! A [`RowEditScript`] tells the presentation layer which rows of one
//! section to delete and insert. Removed indices refer to the table before
//! the edit, inserted indices to the table after it.

use serde::{Deserialize, Serialize};

/// Address of one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowPath {
    pub section: usize,
    pub row: usize,
}

impl RowPath {
    #[must_use]
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// Row delta produced by an expand or collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEditScript {
    /// Section the edit applies to.
    pub section: usize,
    /// Row indices to delete, ascending.
    pub removed: Vec<usize>,
    /// Row indices to insert, ascending.
    pub inserted: Vec<usize>,
    /// The section's first row was off screen before a collapse; scroll it
    /// back to the top after applying the edit.
    pub should_scroll_to_top: bool,
}

impl RowEditScript {
    /// A script that changes nothing.
    #[must_use]
    pub fn empty(section: usize) -> Self {
        Self {
            section,
            ..Default::default()
        }
    }

    /// Whether applying this script is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.inserted.is_empty()
    }

    /// Net change in the section's row count.
    #[must_use]
    pub fn row_delta(&self) -> isize {
        self.inserted.len() as isize - self.removed.len() as isize
    }

    /// Expanding a store with `book_count` books: the "show more" row goes,
    /// the remaining books and a "show less" row arrive.
    pub(crate) fn expand(section: usize, book_count: usize) -> Self {
        Self {
            section,
            removed: vec![1],
            inserted: (1..=book_count).collect(),
            should_scroll_to_top: false,
        }
    }

    /// Collapsing a store with `book_count` books: the inverse of
    /// [`Self::expand`].
    pub(crate) fn collapse(section: usize, book_count: usize, should_scroll_to_top: bool) -> Self {
        Self {
            section,
            removed: (1..=book_count).collect(),
            inserted: vec![1],
            should_scroll_to_top,
        }
    }
}
