//! Pre-order tree walker.

use crate::mdast::Node;

/// Walks `node` and its descendants in pre-order, calling `visitor` once per node.
///
/// The visitor sees a node before its children are read, so children it
/// inserts (for example a prepended title paragraph) are walked as well.
/// Nodes are never revisited within one walk.
pub fn visit_mut<F>(node: &mut Node, visitor: &mut F)
where
    F: FnMut(&mut Node),
{
    visitor(node);
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            visit_mut(child, visitor);
        }
    }
}

/// Read-only pre-order walk.
pub fn visit<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&Node),
{
    visitor(node);
    if let Some(children) = node.children() {
        for child in children {
            visit(child, visitor);
        }
    }
}
