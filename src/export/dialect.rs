//! Export Dialects
//!
//! This module defines the closed set of target markup dialects and the
//! mapping from each dialect to its formatter.

use super::dialects::{GoogleDocsFormatter, RichTextFormatter, SlackFormatter, WhatsAppFormatter};
use super::formatter::Formatter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Dialect
// ─────────────────────────────────────────────────────────────────────────────

/// Supported export dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Slack message markup (`*bold*`, `<url|text>`, bullet lines)
    #[default]
    Slack,
    /// WhatsApp message markup (`*bold*`, `~strike~`, dash lines)
    WhatsApp,
    /// Markdown list pasted as a Google Docs bulleted list
    GoogleDocs,
    /// Markdown with a heading, for generic rich-text editors
    RichText,
}

impl Dialect {
    /// Get the display name for this dialect.
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Slack => "Slack",
            Dialect::WhatsApp => "WhatsApp",
            Dialect::GoogleDocs => "Google Docs",
            Dialect::RichText => "RichText",
        }
    }

    /// Get the identifier accepted by [`FromStr`] and used in settings.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Slack => "slack",
            Dialect::WhatsApp => "whatsapp",
            Dialect::GoogleDocs => "googledocs",
            Dialect::RichText => "richtext",
        }
    }

    /// Get all available dialects.
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::Slack,
            Dialect::WhatsApp,
            Dialect::GoogleDocs,
            Dialect::RichText,
        ]
    }

    /// The formatter implementing this dialect.
    pub fn formatter(&self) -> &'static dyn Formatter {
        match self {
            Dialect::Slack => &SlackFormatter,
            Dialect::WhatsApp => &WhatsAppFormatter,
            Dialect::GoogleDocs => &GoogleDocsFormatter,
            Dialect::RichText => &RichTextFormatter,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dialect name that is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dialect '{0}' (expected one of: slack, whatsapp, googledocs, richtext)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "slack" => Ok(Dialect::Slack),
            "whatsapp" => Ok(Dialect::WhatsApp),
            "googledocs" | "gdocs" => Ok(Dialect::GoogleDocs),
            "richtext" => Ok(Dialect::RichText),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_labels() {
        assert_eq!(Dialect::GoogleDocs.label(), "Google Docs");
        assert_eq!(Dialect::Slack.to_string(), "Slack");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("slack".parse::<Dialect>(), Ok(Dialect::Slack));
        assert_eq!("WhatsApp".parse::<Dialect>(), Ok(Dialect::WhatsApp));
        assert_eq!("google-docs".parse::<Dialect>(), Ok(Dialect::GoogleDocs));
        assert_eq!("GoogleDocs".parse::<Dialect>(), Ok(Dialect::GoogleDocs));
        assert_eq!("gdocs".parse::<Dialect>(), Ok(Dialect::GoogleDocs));
        assert_eq!(" rich_text ".parse::<Dialect>(), Ok(Dialect::RichText));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "teams".parse::<Dialect>().unwrap_err();
        assert_eq!(err, UnknownDialect("teams".to_string()));
        assert!(err.to_string().contains("teams"));
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for dialect in Dialect::all() {
            assert_eq!(dialect.name().parse::<Dialect>(), Ok(*dialect));
        }
    }

    #[test]
    fn test_serde_matches_name() {
        for dialect in Dialect::all() {
            let json = serde_json::to_string(dialect).unwrap();
            assert_eq!(json, format!("\"{}\"", dialect.name()));
        }
    }
}
