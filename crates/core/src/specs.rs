//! Listing specs and their contents for navigation and run collaborators

use crate::callbacks::find_callbacks;
use crate::classifier::{Classification, Classifier};
use crate::styles::{SpecMembership, SpecStyle};
use crate::syntax::{Node, NodeKind};
use crate::types::{Callback, RecognizedTest};
use tracing::debug;

/// Every class or object in the file that classifies as a spec, in source order
pub fn list_specifications<'t>(
    file: Node<'t>,
    classifier: &Classifier,
) -> Vec<(Node<'t>, Classification)> {
    file.descendants()
        .filter(|node| node.kind().is_class_or_object())
        .filter_map(|class| classifier.classify(class).map(|c| (class, c)))
        .collect()
}

/// Tests and containers of `style` declared in `class`, in source order
///
/// Classes nested inside `class` are left out; they are specs of their own or
/// not specs at all.
pub fn list_tests(
    class: Node,
    style: SpecStyle,
    membership: &dyn SpecMembership,
) -> Vec<RecognizedTest> {
    let mut tests = Vec::new();
    let mut stack: Vec<Node> = class.children().collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        if node.kind().is_class_or_object() {
            continue;
        }
        if matches!(
            node.kind(),
            NodeKind::CallExpression | NodeKind::DotQualifiedExpression
        ) {
            if let Some(test) = style.recognize(node, membership) {
                tests.push(test);
            }
        }
        let start = stack.len();
        stack.extend(node.children());
        stack[start..].reverse();
    }
    debug!("Found {} {} tests", tests.len(), style);
    tests
}

pub fn list_callbacks(class: Node) -> Vec<Callback> {
    find_callbacks(class).collect()
}

/// Source for an empty test of `style`
pub fn generate_stub(style: SpecStyle, test_name: &str) -> String {
    style.generate_test(test_name)
}
