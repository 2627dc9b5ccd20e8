//! Rich text formatting for generic editors (email, word processors).

use crate::export::dialect::Dialect;
use crate::export::formatter::{render_outline, EmptyBlock, FormatError, Formatter};
use crate::export::html::markdown_to_html;
use crate::export::markup::{self, convert_inline};
use crate::tree::Node;

/// Root as a level-two heading, descendants as a Markdown list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextFormatter;

impl Formatter for RichTextFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::RichText
    }

    fn format(&self, root: &Node) -> Result<String, FormatError> {
        Ok(outline(root, EmptyBlock::Blank))
    }

    fn to_html(&self, root: &Node) -> Result<String, FormatError> {
        Ok(markdown_to_html(&outline(root, EmptyBlock::ListItem)))
    }
}

fn outline(root: &Node, empty: EmptyBlock) -> String {
    render_outline(
        root,
        empty,
        |depth| match depth {
            0 => "## ".to_string(),
            d => format!("{}- ", "  ".repeat(d - 1)),
        },
        |text| convert_inline(text, &markup::MARKDOWN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        let tree = Node::new("Hello").with_children(vec![Node::new("World")]);
        let export = RichTextFormatter.export(&tree).unwrap();
        assert_eq!(export.plain_text, "## Hello\n- World");
        assert!(export.html.contains("<h2>Hello</h2>"));
        assert!(export.html.contains("<li>World</li>"));
    }

    #[test]
    fn test_empty_root_is_not_a_heading() {
        let tree = Node::new("").with_children(vec![Node::new("a").with_children(vec![Node::new("b")])]);
        assert_eq!(RichTextFormatter.format(&tree).unwrap(), "\n- a\n  - b");
    }

    #[test]
    fn test_empty_parent_keeps_children_nested() {
        let tree = Node::new("Root").with_children(vec![
            Node::new("").with_children(vec![Node::new("child")]),
            Node::new("sibling"),
        ]);
        let export = RichTextFormatter.export(&tree).unwrap();
        assert_eq!(export.plain_text, "## Root\n\n  - child\n- sibling");
        assert!(export.html.contains("<h2>Root</h2>"));
        assert!(!export.html.contains("<pre>"));
        assert!(export
            .html
            .contains("<ul>\n<li>child</li>\n</ul>\n</li>\n<li>sibling</li>"));
    }
}
