//! HTML Generation for Clipboard Export
//!
//! Converts the Markdown text produced by a formatter into an HTML fragment
//! for the rich half of the clipboard payload. The conversion is shared by
//! every dialect and never fails.

use comrak::{markdown_to_html as render_markdown, Options};

/// Convert Markdown to an HTML fragment (no doctype, head, etc.).
///
/// Each source line stays its own line (`<br />`), blank lines separate
/// paragraphs, and raw HTML in block text is escaped rather than passed
/// through.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::default();

    // Enable common extensions
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    // Block text is user content, never trusted markup
    options.render.hardbreaks = true;
    options.render.escape = true;

    render_markdown(markdown, &options)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
