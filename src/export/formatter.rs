//! Formatter capability shared by all dialects.
//!
//! A formatter is a pure function from a [`Node`] tree to dialect text. Every
//! node yields exactly one line (or one multi-line block when its text has
//! line breaks), in document order; empty nodes yield empty lines.
//!
//! The HTML half of an export is rendered from a Markdown list of the same
//! tree. There an empty descendant becomes an item holding a non-breaking
//! space, since a blank line would end the list and detach its children.

use super::dialect::Dialect;
use super::html::markdown_to_html;
use super::markup::{self, convert_inline};
use crate::tree::Node;
use thiserror::Error;

/// The clipboard payload for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedExport {
    pub plain_text: String,
    pub html: String,
}

/// A dialect that cannot represent the given tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{dialect} supports at most {max} nesting levels, block tree has {depth}")]
    TooDeep {
        dialect: Dialect,
        depth: usize,
        max: usize,
    },
}

/// Maps an outline tree onto a target dialect.
pub trait Formatter: Send + Sync {
    /// The dialect this formatter implements.
    fn dialect(&self) -> Dialect;

    /// Render the tree as dialect plain text.
    fn format(&self, root: &Node) -> Result<String, FormatError>;

    /// Render the rich half of the clipboard payload.
    ///
    /// Defaults to the Markdown list of the tree, which keeps chat markers
    /// such as Slack's `*bold*` out of the HTML.
    fn to_html(&self, root: &Node) -> Result<String, FormatError> {
        Ok(markdown_to_html(&markdown_outline(root, EmptyBlock::ListItem)))
    }

    /// Produce both clipboard representations.
    fn export(&self, root: &Node) -> Result<FormattedExport, FormatError> {
        let plain_text = self.format(root)?;
        let html = self.to_html(root)?;
        Ok(FormattedExport { plain_text, html })
    }
}

/// How a block without text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmptyBlock {
    /// An empty line.
    Blank,
    /// The descendant's prefix followed by a non-breaking space, so Markdown
    /// keeps the item and nests its children under it. The root stays blank.
    ListItem,
}

const NBSP: char = '\u{a0}';

/// Lay out one line per node: `prefix(depth)` followed by the converted text.
///
/// Continuation lines of multi-line block text are aligned under the first
/// character after the prefix.
pub(crate) fn render_outline<P, C>(
    root: &Node,
    empty: EmptyBlock,
    prefix: P,
    convert: C,
) -> String
where
    P: Fn(usize) -> String,
    C: Fn(&str) -> String,
{
    let mut lines = Vec::with_capacity(root.count());
    root.walk(&mut |node: &Node, depth: usize| {
        if node.content.trim().is_empty() {
            match empty {
                EmptyBlock::ListItem if depth > 0 => {
                    lines.push(format!("{}{}", prefix(depth), NBSP));
                }
                _ => lines.push(String::new()),
            }
            return;
        }

        let prefix = prefix(depth);
        let continuation = " ".repeat(prefix.chars().count());
        let mut block = String::new();
        for (i, line) in convert(&node.content).lines().enumerate() {
            if i == 0 {
                block.push_str(&prefix);
            } else {
                block.push('\n');
                block.push_str(&continuation);
            }
            block.push_str(line);
        }
        lines.push(block);
    });
    lines.join("\n")
}

/// Indentation used by the Markdown list rendering.
const MARKDOWN_INDENT: &str = "    ";

/// The tree as a Markdown bulleted list under a plain root line.
pub(crate) fn markdown_outline(root: &Node, empty: EmptyBlock) -> String {
    render_outline(
        root,
        empty,
        |depth| match depth {
            0 => String::new(),
            d => format!("{}- ", MARKDOWN_INDENT.repeat(d - 1)),
        },
        |text| convert_inline(text, &markup::MARKDOWN),
    )
}
