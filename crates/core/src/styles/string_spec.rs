use super::{StyleStrategy, recognized};
use crate::patterns::{
    MatchResult, NoMatch, escape_string_literal, leaf, try_match_string_receiver_config_chain,
    try_match_string_receiver_invoke_with_lambda,
};
use crate::syntax::{Node, NodeKind};
use crate::types::{RecognizedTest, TestKind};

/// Flat style: every test is a string invoked with a lambda
///
/// ```kotlin
/// class MySpec : StringSpec({
///     "adds numbers" { }
///     "slow one".config(timeout = 5.seconds) { }
/// })
/// ```
///
/// Strings are invocable in any Kotlin file that imports the right extension,
/// so matches only count inside a confirmed String Spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSpecStyle;

impl StringSpecStyle {
    fn test(node: Node, name: String) -> RecognizedTest {
        // No nesting, so the path is the name itself
        recognized(node, name, Vec::new(), TestKind::Test)
    }
}

impl StyleStrategy for StringSpecStyle {
    fn fq_name(&self) -> &'static str {
        "io.kotest.core.spec.style.StringSpec"
    }

    fn style_name(&self) -> &'static str {
        "String Spec"
    }

    fn generate_test(&self, test_name: &str) -> String {
        format!("\"{}\" {{ }}", escape_string_literal(test_name))
    }

    fn try_match(&self, node: Node) -> MatchResult<RecognizedTest> {
        let name = match node.kind() {
            NodeKind::CallExpression => try_match_string_receiver_invoke_with_lambda(node)?,
            NodeKind::DotQualifiedExpression => {
                try_match_string_receiver_config_chain(node, "config")?
            }
            _ => return Err(NoMatch::Shape),
        };
        Ok(Self::test(node, name))
    }

    fn candidate_for_leaf<'t>(&self, leaf: Node<'t>) -> Option<Node<'t>> {
        match leaf.kind() {
            NodeKind::OpenQuote => leaf::call_expression_for_string_open_quote(leaf),
            NodeKind::Dot => leaf::dot_expression_for_separator(leaf),
            _ => None,
        }
    }

    fn requires_membership(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::testing::*;

    #[test]
    fn test_bare_and_config_forms_agree() {
        let mut tree = file();
        let root = tree.root().id();
        let bare = node(&mut tree, root, NodeKind::CallExpression);
        string(&mut tree, bare, "x");
        lambda(&mut tree, bare);

        let dot = node(&mut tree, root, NodeKind::DotQualifiedExpression);
        string(&mut tree, dot, "x");
        token(&mut tree, dot, NodeKind::Dot, ".");
        let config = node(&mut tree, dot, NodeKind::CallExpression);
        name_ref(&mut tree, config, "config");
        lambda(&mut tree, config);

        let style = StringSpecStyle;
        let bare = style.try_match(tree.node(bare).unwrap()).unwrap();
        let chained = style.try_match(tree.node(dot).unwrap()).unwrap();
        assert_eq!(bare.path, "x");
        assert_eq!((bare.path, bare.kind), (chained.path, chained.kind));
        assert_eq!(chained.kind, TestKind::Test);
    }

    #[test]
    fn test_nested_style_call_is_shape_mismatch() {
        let mut tree = file();
        let root = tree.root().id();
        let (call, _) = dsl_call(&mut tree, root, "expect", "x");

        let result = StringSpecStyle.try_match(tree.node(call).unwrap());
        assert_eq!(result, Err(NoMatch::Shape));
    }

    #[test]
    fn test_leaf_candidates() {
        let mut tree = file();
        let root = tree.root().id();
        let call = node(&mut tree, root, NodeKind::CallExpression);
        let template = string(&mut tree, call, "x");
        lambda(&mut tree, call);

        let tree_ref = &tree;
        let quote = tree_ref
            .node(template)
            .unwrap()
            .first_child_of(NodeKind::OpenQuote)
            .unwrap();
        let candidate = StringSpecStyle.candidate_for_leaf(quote).unwrap();
        assert_eq!(candidate.id(), call);

        let literal = tree_ref
            .node(template)
            .unwrap()
            .first_child_of(NodeKind::LiteralStringEntry)
            .unwrap();
        assert!(StringSpecStyle.candidate_for_leaf(literal).is_none());
    }
}
