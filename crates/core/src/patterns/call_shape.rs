//! Recognizers for the call shapes test DSLs are written in
//!
//! Every matcher is total: it never panics on partial trees and reports why a
//! node was rejected through [`NoMatch`].

use super::{MatchResult, NoMatch, literal::string_literal_value};
use crate::syntax::{Node, NodeKind};
use std::borrow::Cow;

/// `function("literal") { }`
pub fn try_match_function_call_with_string_and_trailing_lambda(
    node: Node,
    function_name: &str,
) -> MatchResult<String> {
    if !node.is(NodeKind::CallExpression) {
        return Err(NoMatch::Shape);
    }
    let elements: Vec<Node> = node.elements().collect();
    let [callee, arguments, lambda] = elements.as_slice() else {
        return Err(NoMatch::Shape);
    };
    if !is_name(*callee, function_name)
        || !arguments.is(NodeKind::ValueArgumentList)
        || !is_trailing_lambda(*lambda)
    {
        return Err(NoMatch::Shape);
    }
    single_string_argument(*arguments)
}

/// `function("literal").config(...) { }`
pub fn try_match_dot_chained_config_on_function_call(
    node: Node,
    function_name: &str,
    config_name: &str,
) -> MatchResult<String> {
    let (receiver, selector) = dot_parts(node)?;
    if !is_config_call_with_lambda(selector, config_name) {
        return Err(NoMatch::Shape);
    }
    try_match_function_call_with_string(receiver, function_name)
}

/// `"literal" { }`
pub fn try_match_string_receiver_invoke_with_lambda(node: Node) -> MatchResult<String> {
    if !node.is(NodeKind::CallExpression) {
        return Err(NoMatch::Shape);
    }
    let elements: Vec<Node> = node.elements().collect();
    let [receiver, lambda] = elements.as_slice() else {
        return Err(NoMatch::Shape);
    };
    if !receiver.is(NodeKind::StringTemplate) || !is_trailing_lambda(*lambda) {
        return Err(NoMatch::Shape);
    }
    string_literal_value(*receiver)
}

/// `"literal".config(...) { }`
pub fn try_match_string_receiver_config_chain(node: Node, config_name: &str) -> MatchResult<String> {
    let (receiver, selector) = dot_parts(node)?;
    if !receiver.is(NodeKind::StringTemplate) || !is_config_call_with_lambda(selector, config_name) {
        return Err(NoMatch::Shape);
    }
    string_literal_value(receiver)
}

pub fn match_function_call_with_string_and_trailing_lambda(
    node: Node,
    function_name: &str,
) -> Option<String> {
    try_match_function_call_with_string_and_trailing_lambda(node, function_name).ok()
}

pub fn match_dot_chained_config_on_function_call(
    node: Node,
    function_name: &str,
    config_name: &str,
) -> Option<String> {
    try_match_dot_chained_config_on_function_call(node, function_name, config_name).ok()
}

pub fn match_string_receiver_invoke_with_lambda(node: Node) -> Option<String> {
    try_match_string_receiver_invoke_with_lambda(node).ok()
}

pub fn match_string_receiver_config_chain(node: Node, config_name: &str) -> Option<String> {
    try_match_string_receiver_config_chain(node, config_name).ok()
}

/// `function("literal")` with no trailing lambda
fn try_match_function_call_with_string(node: Node, function_name: &str) -> MatchResult<String> {
    if !node.is(NodeKind::CallExpression) {
        return Err(NoMatch::Shape);
    }
    let elements: Vec<Node> = node.elements().collect();
    let [callee, arguments] = elements.as_slice() else {
        return Err(NoMatch::Shape);
    };
    if !is_name(*callee, function_name) || !arguments.is(NodeKind::ValueArgumentList) {
        return Err(NoMatch::Shape);
    }
    single_string_argument(*arguments)
}

/// A call made of a bare name followed by a trailing lambda, e.g. `beforeTest { }`
pub fn is_dsl_invocation(node: Node) -> bool {
    if !node.is(NodeKind::CallExpression) {
        return false;
    }
    let elements: Vec<Node> = node.elements().collect();
    matches!(
        elements.as_slice(),
        [callee, lambda] if callee.is(NodeKind::NameReference) && lambda.is(NodeKind::LambdaArgument)
    )
}

/// Name of the function a call invokes, if the callee is a plain name
pub fn function_name<'t>(call: Node<'t>) -> Option<Cow<'t, str>> {
    if !call.is(NodeKind::CallExpression) {
        return None;
    }
    call.first_element()
        .filter(|callee| callee.is(NodeKind::NameReference))
        .map(|callee| callee.text())
}

fn dot_parts<'t>(node: Node<'t>) -> MatchResult<(Node<'t>, Node<'t>)> {
    if !node.is(NodeKind::DotQualifiedExpression) {
        return Err(NoMatch::Shape);
    }
    let elements: Vec<Node<'t>> = node.elements().collect();
    match elements.as_slice() {
        [receiver, selector] => Ok((*receiver, *selector)),
        _ => Err(NoMatch::Shape),
    }
}

fn is_name(node: Node, name: &str) -> bool {
    node.is(NodeKind::NameReference) && node.text() == name
}

fn is_trailing_lambda(node: Node) -> bool {
    node.is(NodeKind::LambdaArgument)
        && node
            .first_child_of(NodeKind::LambdaExpression)
            .is_some_and(|body| !body.has_missing_child())
}

/// `config(...) { }` or `config { }` as the selector of a dotted access
fn is_config_call_with_lambda(node: Node, config_name: &str) -> bool {
    if !node.is(NodeKind::CallExpression) {
        return false;
    }
    let elements: Vec<Node> = node.elements().collect();
    match elements.as_slice() {
        [callee, lambda] => is_name(*callee, config_name) && is_trailing_lambda(*lambda),
        [callee, arguments, lambda] => {
            is_name(*callee, config_name)
                && arguments.is(NodeKind::ValueArgumentList)
                && !arguments.has_missing_child()
                && is_trailing_lambda(*lambda)
        }
        _ => false,
    }
}

fn single_string_argument(arguments: Node) -> MatchResult<String> {
    if arguments.has_missing_child() {
        return Err(NoMatch::Shape);
    }
    let values: Vec<Node> = arguments.elements().collect();
    let [argument] = values.as_slice() else {
        return Err(NoMatch::Literal);
    };
    let parts: Vec<Node> = argument.elements().collect();
    match parts.as_slice() {
        [expression] if expression.is(NodeKind::StringTemplate) => string_literal_value(*expression),
        _ => Err(NoMatch::Literal),
    }
}
