//! Test path construction from enclosing containers

use crate::syntax::{Node, NodeKind};
use crate::types::PATH_SEPARATOR;

/// Names of the containers enclosing `node`, outermost first
///
/// `container_name` is the style's container rule; it is only asked about call
/// expressions.
pub fn container_names<'t>(
    node: Node<'t>,
    container_name: impl Fn(Node<'t>) -> Option<String>,
) -> Vec<String> {
    let mut names: Vec<String> = node
        .ancestors()
        .filter(|ancestor| ancestor.is(NodeKind::CallExpression))
        .filter_map(container_name)
        .collect();
    names.reverse();
    names
}

/// Joins the enclosing container names and `leaf_name` into a test path
pub fn build_path<'t>(
    node: Node<'t>,
    leaf_name: &str,
    container_name: impl Fn(Node<'t>) -> Option<String>,
) -> String {
    join_path(&container_names(node, container_name), leaf_name)
}

/// Joins container names and `leaf_name` with [`PATH_SEPARATOR`]
pub fn join_path(containers: &[String], leaf_name: &str) -> String {
    let mut path = String::new();
    for container in containers {
        path.push_str(container);
        path.push_str(PATH_SEPARATOR);
    }
    path.push_str(leaf_name);
    path
}
