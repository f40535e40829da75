//! EbookTW: search many Taiwanese e-book stores at once.
//!
//! This crate holds everything between the search API and a screen:
//!
//! # Architecture
//!
//! - **API client**: [`ebooktw_api`] builds requests, parses share links and
//!   classifies replies
//! - **Results**: [`results::ResultViewModel`] turns a reply into one table
//!   section per bookstore and expand/collapse edits
//! - **Session**: [`session::SearchSession`] runs one search at a time and
//!   drops replies that arrive after a newer search started
//! - **Thumbnails**: [`thumbnail::ThumbnailSlots`] applies cover downloads only
//!   to rows that still want them
//! - **Settings and history**: injected through [`settings::SettingsProvider`]
//!   and [`history::HistoryStore`]

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod results;
pub mod session;
pub mod settings;
pub mod thumbnail;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use history::{FileHistory, HistoryStore, MemoryHistory};
pub use results::{ResultViewModel, RowContent, RowEditScript, RowPath, Selection, ViewState};
pub use session::{SearchEvent, SearchOutcome, SearchSession, SearchTicket};
pub use settings::{Settings, SettingsProvider};
