use super::{StyleStrategy, recognized};
use crate::hierarchy::container_names;
use crate::patterns::{
    MatchResult, NoMatch, escape_string_literal, leaf,
    match_function_call_with_string_and_trailing_lambda,
    try_match_dot_chained_config_on_function_call,
    try_match_function_call_with_string_and_trailing_lambda,
};
use crate::syntax::{Node, NodeKind};
use crate::types::{RecognizedTest, TestKind};

/// Nested style: named containers holding named tests
///
/// ```kotlin
/// class MySpec : ExpectSpec({
///     context("a calculator") {
///         expect("addition") { }
///         expect("division").config(enabled = false) { }
///     }
/// })
/// ```
///
/// Expect, Fun and Should specs differ only in the function names, so one
/// table-driven strategy serves all three.
#[derive(Debug, Clone, Copy)]
pub struct NestedStyle {
    pub fq_name: &'static str,
    pub style_name: &'static str,
    /// Function opening a container, e.g. `context`
    pub container_fn: &'static str,
    /// Function declaring a leaf test, e.g. `expect`
    pub test_fn: &'static str,
}

impl NestedStyle {
    fn build(&self, node: Node, name: String, kind: TestKind) -> RecognizedTest {
        let containers = container_names(node, |ancestor| self.container_name(ancestor));
        recognized(node, name, containers, kind)
    }

    fn try_call(&self, node: Node) -> MatchResult<RecognizedTest> {
        match try_match_function_call_with_string_and_trailing_lambda(node, self.test_fn) {
            Ok(name) => Ok(self.build(node, name, TestKind::Test)),
            Err(test_error) => {
                try_match_function_call_with_string_and_trailing_lambda(node, self.container_fn)
                    .map(|name| self.build(node, name, TestKind::Container))
                    .map_err(|container_error| test_error.most_specific(container_error))
            }
        }
    }
}

impl StyleStrategy for NestedStyle {
    fn fq_name(&self) -> &'static str {
        self.fq_name
    }

    fn style_name(&self) -> &'static str {
        self.style_name
    }

    fn generate_test(&self, test_name: &str) -> String {
        format!(
            "{}(\"{}\") {{ }}",
            self.test_fn,
            escape_string_literal(test_name)
        )
    }

    fn try_match(&self, node: Node) -> MatchResult<RecognizedTest> {
        match node.kind() {
            NodeKind::CallExpression => self.try_call(node),
            NodeKind::DotQualifiedExpression => {
                let name =
                    try_match_dot_chained_config_on_function_call(node, self.test_fn, "config")?;
                Ok(self.build(node, name, TestKind::Test))
            }
            _ => Err(NoMatch::Shape),
        }
    }

    fn candidate_for_leaf<'t>(&self, leaf: Node<'t>) -> Option<Node<'t>> {
        match leaf.kind() {
            NodeKind::Identifier => {
                let text = leaf.text();
                if text != self.test_fn && text != self.container_fn {
                    return None;
                }
                leaf::call_expression_for_name_identifier(leaf)
            }
            NodeKind::Dot => leaf::dot_expression_for_separator(leaf),
            _ => None,
        }
    }

    fn container_name(&self, node: Node) -> Option<String> {
        match_function_call_with_string_and_trailing_lambda(node, self.container_fn)
    }
}
