//! Slack message formatting.

use crate::export::dialect::Dialect;
use crate::export::formatter::{render_outline, EmptyBlock, FormatError, Formatter};
use crate::export::markup::{self, convert_inline};
use crate::tree::Node;

/// Root line as-is, descendants as `•` bullets indented two spaces per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackFormatter;

impl Formatter for SlackFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::Slack
    }

    fn format(&self, root: &Node) -> Result<String, FormatError> {
        Ok(render_outline(
            root,
            EmptyBlock::Blank,
            |depth| match depth {
                0 => String::new(),
                d => format!("{}• ", "  ".repeat(d)),
            },
            |text| convert_inline(text, &markup::SLACK),
        ))
    }
}
