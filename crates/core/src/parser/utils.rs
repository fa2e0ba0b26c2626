use crate::types::{Position, Span};
use tree_sitter::Node;

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

pub fn node_to_span(node: &Node) -> Span {
    Span::new(node_to_position(node, true), node_to_position(node, false))
}

/// Returns the UTF-8 text of a tree-sitter node, or an empty string for invalid ranges
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
