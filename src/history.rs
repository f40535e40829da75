//! Search history storage.
//!
//! Keywords are kept most-recent-first. Searching a keyword again moves it to
//! the front instead of adding a duplicate. Capacity is bounded; the oldest
//! keyword is evicted first.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Storage for past search keywords.
pub trait HistoryStore: Send {
    /// Record a keyword as the most recent search. Blank keywords are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::History`] or [`AppError::Io`] if persisting fails.
    fn add(&mut self, keyword: &str) -> Result<()>;

    /// Keywords containing `filter` (case-insensitive), most recent first.
    /// An empty filter returns everything.
    fn list(&self, filter: &str) -> Vec<String>;

    /// Remove every keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the empty history fails.
    fn clear(&mut self) -> Result<()>;

    /// All keywords as text, one per line, each line newline-terminated.
    fn export_text(&self) -> String {
        self.list("").iter().map(|k| format!("{k}\n")).collect()
    }
}

/// A recorded search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub keyword: String,
    pub searched_at: DateTime<Utc>,
}

/// In-memory history with fixed capacity.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    /// Most recent first.
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl MemoryHistory {
    /// Create an empty history holding at most `max_entries` keywords.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    fn from_entries(entries: Vec<HistoryEntry>, max_entries: usize) -> Self {
        let mut history = Self::new(max_entries);
        // Stored most-recent-first; replay oldest first so dedup keeps the newest.
        for entry in entries.into_iter().rev() {
            history.insert(entry);
        }
        history
    }

    fn insert(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.keyword != entry.keyword);
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(200)
    }
}

impl HistoryStore for MemoryHistory {
    fn add(&mut self, keyword: &str) -> Result<()> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(());
        }
        self.insert(HistoryEntry {
            keyword: keyword.to_string(),
            searched_at: Utc::now(),
        });
        Ok(())
    }

    fn list(&self, filter: &str) -> Vec<String> {
        let needle = filter.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.keyword.to_lowercase().contains(&needle))
            .map(|e| e.keyword.clone())
            .collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// History persisted as a JSON array in a single file.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash never leaves a half-written history.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
    inner: MemoryHistory,
}

impl FileHistory {
    /// Open the history at `path`. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str::<Vec<HistoryEntry>>(&content).map_err(|e| {
                AppError::History(format!("cannot parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "history opened");
        Ok(Self {
            path,
            inner: MemoryHistory::from_entries(entries, max_entries),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entries: Vec<&HistoryEntry> = self.inner.entries().collect();
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| AppError::History(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn add(&mut self, keyword: &str) -> Result<()> {
        if keyword.trim().is_empty() {
            return Ok(());
        }
        self.inner.add(keyword)?;
        self.persist()
    }

    fn list(&self, filter: &str) -> Vec<String> {
        self.inner.list(filter)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()?;
        self.persist()
    }
}
