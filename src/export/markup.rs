//! Inline markup conversion
//!
//! Block text arrives in the outliner's own inline syntax: `**bold**`,
//! `__italic__`, `~~strike~~`, `^^highlight^^`, `[[Page]]` references,
//! `[alias]([[Page]])` aliases, `{{[[TODO]]}}` checkboxes and Markdown links.
//! Each dialect describes its target syntax with an [`InlineRules`] value and
//! [`convert_inline`] rewrites the text accordingly.

use regex::Regex;
use std::sync::OnceLock;

/// How a `[text](url)` link is written in the target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[text](url)`
    Markdown,
    /// `<url|text>`
    Angle,
    /// `text (url)`
    Parenthesized,
}

/// Target syntax for inline emphasis and links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineRules {
    pub bold: &'static str,
    pub italic: &'static str,
    pub strike: &'static str,
    pub link: LinkStyle,
}

/// CommonMark/GFM output, also fed to the HTML renderer.
pub const MARKDOWN: InlineRules = InlineRules {
    bold: "**",
    italic: "*",
    strike: "~~",
    link: LinkStyle::Markdown,
};

/// Slack mrkdwn.
pub const SLACK: InlineRules = InlineRules {
    bold: "*",
    italic: "_",
    strike: "~",
    link: LinkStyle::Angle,
};

/// WhatsApp message formatting.
pub const WHATSAPP: InlineRules = InlineRules {
    bold: "*",
    italic: "_",
    strike: "~",
    link: LinkStyle::Parenthesized,
};

const UNCHECKED_BOX: &str = "☐";
const CHECKED_BOX: &str = "☑";

struct Patterns {
    todo: Regex,
    done: Regex,
    alias: Regex,
    page_ref: Regex,
    link: Regex,
    bold: Regex,
    italic: Regex,
    strike: Regex,
    highlight: Regex,
}

impl Patterns {
    fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("inline markup pattern is valid");
        Self {
            todo: compile(r"\{\{\[\[TODO\]\]\}\}\s?"),
            done: compile(r"\{\{\[\[DONE\]\]\}\}\s?"),
            alias: compile(r"\[([^\]]+)\]\((?:\[\[[^\]]+\]\]|\(\([^)]+\)\))\)"),
            page_ref: compile(r"#?\[\[([^\[\]]*)\]\]"),
            link: compile(r"\[([^\]]+)\]\(([^)\s]+)\)"),
            bold: compile(r"\*\*(.+?)\*\*"),
            italic: compile(r"__(.+?)__"),
            strike: compile(r"~~(.+?)~~"),
            highlight: compile(r"\^\^(.+?)\^\^"),
        }
    }
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::new)
}

/// Rewrite outliner inline markup into the syntax described by `rules`.
pub fn convert_inline(text: &str, rules: &InlineRules) -> String {
    let p = patterns();

    let text = p
        .todo
        .replace_all(text, format!("{} ", UNCHECKED_BOX).as_str())
        .into_owned();
    let text = p
        .done
        .replace_all(&text, format!("{} ", CHECKED_BOX).as_str())
        .into_owned();
    let text = p.alias.replace_all(&text, "${1}").into_owned();
    let text = p.page_ref.replace_all(&text, "${1}").into_owned();

    let text = match rules.link {
        LinkStyle::Markdown => text,
        LinkStyle::Angle => p.link.replace_all(&text, "<${2}|${1}>").into_owned(),
        LinkStyle::Parenthesized => p.link.replace_all(&text, "${1} (${2})").into_owned(),
    };

    let text = wrap(&p.bold, &text, rules.bold);
    let text = wrap(&p.italic, &text, rules.italic);
    let text = wrap(&p.strike, &text, rules.strike);
    p.highlight.replace_all(&text, "${1}").into_owned()
}

fn wrap(pattern: &Regex, text: &str, marker: &str) -> String {
    let replacement = format!("{0}${{1}}{0}", marker);
    pattern.replace_all(text, replacement.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slack_emphasis() {
        let out = convert_inline("**bold** __it__ ~~gone~~ ^^hl^^", &SLACK);
        assert_eq!(out, "*bold* _it_ ~gone~ hl");
    }

    #[test]
    fn test_markdown_emphasis() {
        let out = convert_inline("**bold** __it__ ~~gone~~", &MARKDOWN);
        assert_eq!(out, "**bold** *it* ~~gone~~");
    }

    #[test]
    fn test_page_refs_and_tags() {
        let out = convert_inline("see [[Project X]] and #[[Long Tag]] or #short", &SLACK);
        assert_eq!(out, "see Project X and Long Tag or #short");
    }

    #[test]
    fn test_alias_keeps_label() {
        let out = convert_inline("[the plan]([[Plan 2024]]) and [ref](((abc123)))", &MARKDOWN);
        assert_eq!(out, "the plan and ref");
    }

    #[test]
    fn test_link_styles() {
        let text = "read [docs](https://example.com/docs)";
        assert_eq!(
            convert_inline(text, &SLACK),
            "read <https://example.com/docs|docs>"
        );
        assert_eq!(
            convert_inline(text, &WHATSAPP),
            "read docs (https://example.com/docs)"
        );
        assert_eq!(convert_inline(text, &MARKDOWN), text);
    }

    #[test]
    fn test_todo_markers() {
        assert_eq!(convert_inline("{{[[TODO]]}} buy milk", &SLACK), "☐ buy milk");
        assert_eq!(convert_inline("{{[[DONE]]}} ship it", &MARKDOWN), "☑ ship it");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "nothing to see: a * b, 2 ^ 3, snake_case";
        assert_eq!(convert_inline(text, &SLACK), text);
    }
}
