//! WhatsApp message formatting.

use crate::export::dialect::Dialect;
use crate::export::formatter::{render_outline, EmptyBlock, FormatError, Formatter};
use crate::export::markup::{self, convert_inline};
use crate::tree::Node;

/// Root line as-is, descendants as `-` items indented three spaces per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatsAppFormatter;

impl Formatter for WhatsAppFormatter {
    fn dialect(&self) -> Dialect {
        Dialect::WhatsApp
    }

    fn format(&self, root: &Node) -> Result<String, FormatError> {
        Ok(render_outline(
            root,
            EmptyBlock::Blank,
            |depth| match depth {
                0 => String::new(),
                d => format!("{}- ", "   ".repeat(d - 1)),
            },
            |text| convert_inline(text, &markup::WHATSAPP),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        let tree = Node::new("Hello").with_children(vec![Node::new("World")]);
        assert_eq!(WhatsAppFormatter.format(&tree).unwrap(), "Hello\n- World");
    }

    #[test]
    fn test_nesting_and_markup() {
        let tree = Node::new("Trip").with_children(vec![
            Node::new("**Flights**").with_children(vec![Node::new("~~Tuesday~~ Wednesday")]),
            Node::new("[Hotel](https://hotel.example)"),
        ]);
        assert_eq!(
            WhatsAppFormatter.format(&tree).unwrap(),
            "Trip\n- *Flights*\n   - ~Tuesday~ Wednesday\n- Hotel (https://hotel.example)"
        );
    }

    #[test]
    fn test_empty_parent_keeps_children_nested() {
        let tree = Node::new("Root").with_children(vec![
            Node::new("").with_children(vec![Node::new("child")]),
            Node::new("sibling"),
        ]);
        let export = WhatsAppFormatter.export(&tree).unwrap();
        assert_eq!(export.plain_text, "Root\n\n   - child\n- sibling");
        assert!(!export.html.contains("<pre>"));
        assert!(export
            .html
            .contains("<ul>\n<li>child</li>\n</ul>\n</li>\n<li>sibling</li>"));
    }
}
