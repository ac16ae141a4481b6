//! Core engine for Roster - state machine and orchestration.
//!
//! This crate contains the [`App`] state machine without TUI dependencies.

mod app;
mod config;

pub use app::App;
pub use config::{
    ApiSection, AppSection, ConfigError, DEFAULT_BASE_URL, RosterConfig, Settings, SettingsError,
};

// Re-export from crates for public API
pub use roster_client::{FetchError, ItemsClient};
pub use roster_types::{ApiToken, Item, UiOptions, ViewPhase};
