//! Cheap mappings from a single token to the expression it may start
//!
//! These run for every token during incremental highlighting, so each one
//! rejects on the token kind before looking at any parent.

use crate::syntax::{Node, NodeKind};

/// The opening quote of `"literal" { }` maps to the call expression
pub fn call_expression_for_string_open_quote(leaf: Node) -> Option<Node> {
    if !leaf.is(NodeKind::OpenQuote) {
        return None;
    }
    let template = leaf.parent()?;
    let call = template.parent()?;
    let is_callee = call.is(NodeKind::CallExpression) && call.first_element() == Some(template);
    is_callee.then_some(call)
}

/// The function name of `name(...)` maps to the call expression
pub fn call_expression_for_name_identifier(leaf: Node) -> Option<Node> {
    if !leaf.is(NodeKind::Identifier) {
        return None;
    }
    let reference = leaf.parent()?;
    if !reference.is(NodeKind::NameReference) {
        return None;
    }
    let call = reference.parent()?;
    let is_callee = call.is(NodeKind::CallExpression) && call.first_element() == Some(reference);
    is_callee.then_some(call)
}

/// The `.` of `receiver.selector` maps to the dotted expression
pub fn dot_expression_for_separator(leaf: Node) -> Option<Node> {
    if !leaf.is(NodeKind::Dot) {
        return None;
    }
    leaf.parent()
        .filter(|parent| parent.is(NodeKind::DotQualifiedExpression))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::testing::*;

    #[test]
    fn test_open_quote_maps_to_call() {
        let mut tree = file();
        let root = tree.root().id();
        let call = node(&mut tree, root, NodeKind::CallExpression);
        let template = string(&mut tree, call, "name");
        lambda(&mut tree, call);

        let quote = tree
            .node(template)
            .unwrap()
            .first_child_of(NodeKind::OpenQuote)
            .unwrap();
        assert_eq!(
            call_expression_for_string_open_quote(quote).map(|n| n.id()),
            Some(call)
        );

        let closing = tree
            .node(template)
            .unwrap()
            .first_child_of(NodeKind::ClosingQuote)
            .unwrap();
        assert!(call_expression_for_string_open_quote(closing).is_none());
    }

    #[test]
    fn test_quote_of_argument_does_not_map() {
        let mut tree = file();
        let root = tree.root().id();
        let (call, _) = dsl_call(&mut tree, root, "expect", "name");
        let quote = tree
            .node(call)
            .unwrap()
            .descendants()
            .find(|n| n.is(NodeKind::OpenQuote))
            .unwrap();
        assert!(call_expression_for_string_open_quote(quote).is_none());
    }

    #[test]
    fn test_name_identifier_maps_to_call() {
        let mut tree = file();
        let root = tree.root().id();
        let (call, _) = dsl_call(&mut tree, root, "expect", "name");
        let ident = tree
            .node(call)
            .unwrap()
            .descendants()
            .find(|n| n.is(NodeKind::Identifier))
            .unwrap();
        assert_eq!(
            call_expression_for_name_identifier(ident).map(|n| n.id()),
            Some(call)
        );
    }

    #[test]
    fn test_dot_separator_maps_to_dot_expression() {
        let mut tree = file();
        let root = tree.root().id();
        let dot = node(&mut tree, root, NodeKind::DotQualifiedExpression);
        string(&mut tree, dot, "a");
        let separator = token(&mut tree, dot, NodeKind::Dot, ".");
        name_ref(&mut tree, dot, "length");

        let separator = tree.node(separator).unwrap();
        assert_eq!(dot_expression_for_separator(separator).map(|n| n.id()), Some(dot));
        assert!(dot_expression_for_separator(tree.root()).is_none());
    }
}
