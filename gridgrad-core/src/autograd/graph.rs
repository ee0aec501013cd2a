use std::collections::HashSet;
use std::rc::Rc;

use crate::autograd::backward_op::{GradFn, Node, NodeId, Operand};
use crate::error::GridGradError;

/// Orders every node reachable from `root` so that each node appears after
/// all of its predecessors (post-order). Consuming the result back to front
/// gives a valid reverse-topological replay order.
///
/// The traversal is iterative and marks nodes on first visit, so a node
/// shared by several paths (diamond dependency) is listed once. The graph is
/// acyclic by construction: a node is always created after its operands.
pub(crate) fn topological_sort(root: &Rc<Node>) -> Vec<Rc<Node>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    // (node, predecessors already pushed)
    let mut stack: Vec<(Rc<Node>, bool)> = vec![(Rc::clone(root), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted.push(node);
            continue;
        }
        if !visited.insert(Node::id(&node)) {
            continue;
        }
        stack.push((Rc::clone(&node), true));
        for pred in node.op.predecessors() {
            if !visited.contains(&Node::id(pred)) {
                stack.push((Rc::clone(pred), false));
            }
        }
    }
    sorted
}

/// Runs reverse-mode differentiation rooted at `root`.
///
/// Gradient accumulators of operator outputs belong to the pass: they are
/// zeroed before the root is seeded with ones. Leaves only ever accumulate,
/// so clearing them is the caller's job (`zero_grad`).
pub(crate) fn backward(root: &Operand, operation: &str) -> Result<(), GridGradError> {
    if !root.grid.requires_grad() {
        return Err(GridGradError::RequiresGradNotMet {
            operation: operation.to_string(),
        });
    }

    let node = match root.grad_fn.as_ref() {
        Some(node) => node,
        None => {
            log::debug!("backward() called on a leaf. Accumulating the seed directly.");
            GradFn::AccumulateLeaf {
                leaf: root.grid.clone(),
            }
            .backward();
            return Ok(());
        }
    };

    let sorted = topological_sort(node);
    log::debug!(
        "backward() from {:?}: replaying {} gradient functions",
        node.kind(),
        sorted.len()
    );

    for n in &sorted {
        if let Some(out) = n.op.output() {
            out.fill_grad(0.0);
        }
    }
    root.grid.fill_grad(1.0);

    for n in sorted.iter().rev() {
        log::trace!("replaying {:?}", n.kind());
        n.op.backward();
    }
    Ok(())
}
