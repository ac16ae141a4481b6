//! Core domain types for Roster.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

use serde::Deserialize;

// ============================================================================
// Item
// ============================================================================

/// A single record returned by the items endpoint.
///
/// Items are deserialized from the server response and never constructed
/// locally outside of tests. `created_at` is opaque display text; nothing
/// parses it as a date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Unique within the returned collection.
    pub id: i64,
    /// Short classification string. Wire name is `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub created_at: String,
}

// ============================================================================
// View phase
// ============================================================================

/// Display state of the item list, reset on each mount.
///
/// The enum carries its payload with the phase, so items and an error
/// message can never be populated at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Initial state: the fetch has been issued but has not resolved.
    #[default]
    Loading,
    /// Terminal state: the fetch succeeded. Items are in server order.
    Loaded(Vec<Item>),
    /// Terminal state: the fetch failed. Holds the user-visible message.
    Failed(String),
}

impl ViewPhase {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, ViewPhase::Loading)
    }

    /// Items to render, if any. `Loading` and `Failed` render no table.
    #[must_use]
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            ViewPhase::Loaded(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// API token
// ============================================================================

/// A static bearer credential for the items endpoint.
///
/// The wrapped secret is only reachable through [`ApiToken::expose_secret`];
/// `Debug` output is redacted so the token cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

#[derive(Debug, thiserror::Error)]
#[error("API token must not be empty")]
pub struct EmptyTokenError;

impl ApiToken {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyTokenError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

// Manual Debug impl to prevent leaking the credential in logs.
impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiToken").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// UI options
// ============================================================================

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for icons and spinners.
    pub ascii_only: bool,
    /// Use a high-contrast color palette.
    pub high_contrast: bool,
    /// Disable spinner animation.
    pub reduced_motion: bool,
}
