//! Google Docs formatting.
//!
//! Google Docs turns pasted HTML lists into native bulleted lists, which
//! support nine levels of nesting. The plain text is the same list in
//! Markdown.

use crate::export::dialect::Dialect;
use crate::export::formatter::{markdown_outline, EmptyBlock, FormatError, Formatter};
use crate::tree::Node;

/// Deepest list nesting Google Docs can represent.
pub const MAX_LIST_LEVELS: usize = 9;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleDocsFormatter;

impl Formatter for GoogleDocsFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::GoogleDocs
    }

    fn format(&self, root: &Node) -> Result<String, FormatError> {
        let depth = root.depth();
        if depth > MAX_LIST_LEVELS {
            return Err(FormatError::TooDeep {
                dialect: Dialect::GoogleDocs,
                depth,
                max: MAX_LIST_LEVELS,
            });
        }
        Ok(markdown_outline(root, EmptyBlock::Blank))
    }
}
