//! User settings for blockport
//!
//! This module defines the `Settings` struct that holds the user-configurable
//! export options, with serde support for JSON persistence.

use crate::export::Dialect;
use crate::tree::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Export preferences.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dialect used when the caller does not name one
    pub default_dialect: Dialect,

    /// Upper bound on fetching a block tree, in milliseconds (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_ms: Option<u64>,

    /// Deepest block level included in an export
    pub max_depth: usize,

    /// Whether to place HTML on the clipboard alongside plain text
    pub html_clipboard: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_dialect: Dialect::default(),
            fetch_timeout_ms: None,
            max_depth: DEFAULT_MAX_DEPTH,
            html_clipboard: true,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed depth bound.
    pub const MIN_DEPTH: usize = 1;
    /// Maximum allowed depth bound.
    pub const MAX_DEPTH: usize = 4096;
    /// Shortest fetch timeout honored; smaller values are raised to it.
    pub const MIN_FETCH_TIMEOUT_MS: u64 = 50;

    /// The configured fetch timeout.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.max_depth = self.max_depth.clamp(Self::MIN_DEPTH, Self::MAX_DEPTH);

        // Zero means "no timeout"
        self.fetch_timeout_ms = match self.fetch_timeout_ms {
            Some(0) | None => None,
            Some(ms) => Some(ms.max(Self::MIN_FETCH_TIMEOUT_MS)),
        };
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_dialect, Dialect::Slack);
        assert_eq!(settings.fetch_timeout(), None);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
        assert!(settings.html_clipboard);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_dialect": "googledocs"}"#).unwrap();
        assert_eq!(settings.default_dialect, Dialect::GoogleDocs);
        assert!(settings.html_clipboard);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let result = Settings::from_json_sanitized(r#"{"default_dialect": "teams"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_depth() {
        let mut settings = Settings {
            max_depth: 0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.max_depth, Settings::MIN_DEPTH);

        settings.max_depth = 1_000_000;
        settings.sanitize();
        assert_eq!(settings.max_depth, Settings::MAX_DEPTH);
    }

    #[test]
    fn test_sanitize_timeout() {
        let settings = Settings::from_json_sanitized(r#"{"fetch_timeout_ms": 0}"#).unwrap();
        assert_eq!(settings.fetch_timeout(), None);

        let settings = Settings::from_json_sanitized(r#"{"fetch_timeout_ms": 5}"#).unwrap();
        assert_eq!(
            settings.fetch_timeout(),
            Some(Duration::from_millis(Settings::MIN_FETCH_TIMEOUT_MS))
        );

        let settings = Settings::from_json_sanitized(r#"{"fetch_timeout_ms": 2500}"#).unwrap();
        assert_eq!(settings.fetch_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_timeout_omitted_when_unset() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(!json.contains("fetch_timeout_ms"));
    }
}
