//! User-facing behaviour toggles.
//!
//! The core never reads ambient global state. Anything that needs a toggle
//! takes a [`SettingsProvider`], so tests can pass a plain [`Settings`].

use serde::{Deserialize, Serialize};

/// Read access to the user's settings.
pub trait SettingsProvider: Send + Sync {
    /// Skip thumbnail downloads.
    fn data_saver_enabled(&self) -> bool;
    /// Route keyword searches to the web-scraping fallback instead of the API.
    fn legacy_mode_enabled(&self) -> bool;
    /// Talk to the pre-production API port.
    fn use_dev_endpoint(&self) -> bool;
    /// Show developer-facing error details.
    fn verbose_errors(&self) -> bool;
}

/// Plain settings values, as stored in the `[settings]` config table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_saver: bool,
    pub legacy_mode: bool,
    pub dev_endpoint: bool,
    pub verbose_errors: bool,
}

impl SettingsProvider for Settings {
    fn data_saver_enabled(&self) -> bool {
        self.data_saver
    }

    fn legacy_mode_enabled(&self) -> bool {
        self.legacy_mode
    }

    fn use_dev_endpoint(&self) -> bool {
        self.dev_endpoint
    }

    fn verbose_errors(&self) -> bool {
        self.verbose_errors
    }
}
