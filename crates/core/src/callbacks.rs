//! Lifecycle callbacks declared in a spec's initializer block

use crate::patterns::{function_name, is_dsl_invocation};
use crate::syntax::{Node, NodeKind};
use crate::types::{Callback, CallbackKind};

/// Callbacks declared directly in the first `init { }` block of `class`
///
/// Only calls that are immediate statements of the block count; a
/// `beforeTest { }` nested in another call is not a spec callback. The
/// iterator yields in source order.
pub fn find_callbacks<'t>(class: Node<'t>) -> impl Iterator<Item = Callback> + 't {
    initializer_block(class)
        .into_iter()
        .flat_map(|block| block.children_of(NodeKind::CallExpression))
        .filter_map(callback_of)
}

fn initializer_block(class: Node) -> Option<Node> {
    class
        .first_child_of(NodeKind::ClassBody)?
        .first_child_of(NodeKind::ClassInitializer)?
        .first_child_of(NodeKind::BlockExpression)
}

fn callback_of(call: Node) -> Option<Callback> {
    if !is_dsl_invocation(call) {
        return None;
    }
    let kind = CallbackKind::from_keyword(&function_name(call)?)?;
    Some(Callback {
        kind,
        anchor: call.id(),
        span: call.span(),
    })
}
