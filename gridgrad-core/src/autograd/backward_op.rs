use std::fmt;
use std::rc::Rc;

use crate::scalar_data::Grid;

/// Stable identity of a graph node for the duration of a backward pass.
///
/// Nodes are kept alive by the values that reference them, so the address of
/// the `Rc` allocation is unique while the pass runs.
pub type NodeId = *const Node;

/// The operator a [`Node`] records. Exposed for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Multiply,
    Scale,
    MatrixMultiply,
    Power,
    Sine,
    Cosine,
    Log,
    Exp,
    Relu,
    Mean,
    AccumulateLeaf,
}

/// A value as seen by the node that consumes it: its cells and the node that
/// produced it (`None` for leaves).
#[derive(Debug, Clone)]
pub(crate) struct Operand {
    pub(crate) grid: Grid,
    pub(crate) grad_fn: Option<Rc<Node>>,
}

impl Operand {
    pub(crate) fn leaf(grid: Grid) -> Self {
        Operand { grid, grad_fn: None }
    }

    /// Row of `self` an output row reads from when `self` may be row-broadcast.
    pub(crate) fn source_row(&self, out_row: usize) -> usize {
        if self.grid.rows() == 1 {
            0
        } else {
            out_row
        }
    }
}

/// One differentiable operator application.
///
/// Every variant owns its operands and its output grid. Operands never hold
/// a reference back to the node consuming them, so the graph has no cycles.
#[derive(Debug)]
pub(crate) enum GradFn {
    /// `out = lhs + rhs`, either operand may be a single row broadcast over
    /// the output rows.
    Add { lhs: Operand, rhs: Operand, out: Grid },
    /// Elementwise product of equal shapes.
    Multiply { lhs: Operand, rhs: Operand, out: Grid },
    /// Product with a numeric literal.
    Scale { input: Operand, factor: f64, out: Grid },
    MatrixMultiply { lhs: Operand, rhs: Operand, out: Grid },
    Power { input: Operand, exponent: f64, out: Grid },
    Sine { input: Operand, out: Grid },
    Cosine { input: Operand, out: Grid },
    Log { input: Operand, out: Grid },
    Exp { input: Operand, out: Grid },
    Relu { input: Operand, out: Grid },
    /// `out` is 1x1.
    Mean { input: Operand, out: Grid },
    /// Base case: adds the seed gradient straight into a leaf.
    AccumulateLeaf { leaf: Grid },
}

impl GradFn {
    pub(crate) fn kind(&self) -> OpKind {
        match self {
            GradFn::Add { .. } => OpKind::Add,
            GradFn::Multiply { .. } => OpKind::Multiply,
            GradFn::Scale { .. } => OpKind::Scale,
            GradFn::MatrixMultiply { .. } => OpKind::MatrixMultiply,
            GradFn::Power { .. } => OpKind::Power,
            GradFn::Sine { .. } => OpKind::Sine,
            GradFn::Cosine { .. } => OpKind::Cosine,
            GradFn::Log { .. } => OpKind::Log,
            GradFn::Exp { .. } => OpKind::Exp,
            GradFn::Relu { .. } => OpKind::Relu,
            GradFn::Mean { .. } => OpKind::Mean,
            GradFn::AccumulateLeaf { .. } => OpKind::AccumulateLeaf,
        }
    }

    fn operands(&self) -> Vec<&Operand> {
        match self {
            GradFn::Add { lhs, rhs, .. }
            | GradFn::Multiply { lhs, rhs, .. }
            | GradFn::MatrixMultiply { lhs, rhs, .. } => vec![lhs, rhs],
            GradFn::Scale { input, .. }
            | GradFn::Power { input, .. }
            | GradFn::Sine { input, .. }
            | GradFn::Cosine { input, .. }
            | GradFn::Log { input, .. }
            | GradFn::Exp { input, .. }
            | GradFn::Relu { input, .. }
            | GradFn::Mean { input, .. } => vec![input],
            GradFn::AccumulateLeaf { .. } => Vec::new(),
        }
    }

    fn operands_mut(&mut self) -> Vec<&mut Operand> {
        match self {
            GradFn::Add { lhs, rhs, .. }
            | GradFn::Multiply { lhs, rhs, .. }
            | GradFn::MatrixMultiply { lhs, rhs, .. } => vec![lhs, rhs],
            GradFn::Scale { input, .. }
            | GradFn::Power { input, .. }
            | GradFn::Sine { input, .. }
            | GradFn::Cosine { input, .. }
            | GradFn::Log { input, .. }
            | GradFn::Exp { input, .. }
            | GradFn::Relu { input, .. }
            | GradFn::Mean { input, .. } => vec![input],
            GradFn::AccumulateLeaf { .. } => Vec::new(),
        }
    }

    /// The grid this node wrote in the forward pass. `None` for the leaf case,
    /// which has no output of its own.
    pub(crate) fn output(&self) -> Option<&Grid> {
        match self {
            GradFn::Add { out, .. }
            | GradFn::Multiply { out, .. }
            | GradFn::Scale { out, .. }
            | GradFn::MatrixMultiply { out, .. }
            | GradFn::Power { out, .. }
            | GradFn::Sine { out, .. }
            | GradFn::Cosine { out, .. }
            | GradFn::Log { out, .. }
            | GradFn::Exp { out, .. }
            | GradFn::Relu { out, .. }
            | GradFn::Mean { out, .. } => Some(out),
            GradFn::AccumulateLeaf { .. } => None,
        }
    }

    /// Nodes that produced this node's operands. Leaves contribute nothing.
    pub(crate) fn predecessors(&self) -> Vec<&Rc<Node>> {
        self.operands()
            .into_iter()
            .filter_map(|operand| operand.grad_fn.as_ref())
            .collect()
    }

    /// Adds this node's local gradient contribution into its operands,
    /// reading the output accumulator as it stands now.
    ///
    /// The caller guarantees the output accumulator is complete, i.e. every
    /// consumer of the output has already run.
    pub(crate) fn backward(&self) {
        match self {
            GradFn::Add { lhs, rhs, out } => {
                for r in 0..out.rows() {
                    for c in 0..out.cols() {
                        let g = out.grad_at(r, c);
                        // A broadcast operand receives one contribution per
                        // output row, which sums it over the broadcast axis.
                        lhs.grid.accumulate_grad_at(lhs.source_row(r), c, g);
                        rhs.grid.accumulate_grad_at(rhs.source_row(r), c, g);
                    }
                }
            }
            GradFn::Multiply { lhs, rhs, out } => {
                for r in 0..out.rows() {
                    for c in 0..out.cols() {
                        let g = out.grad_at(r, c);
                        let a = lhs.grid.data_at(r, c);
                        let b = rhs.grid.data_at(r, c);
                        lhs.grid.accumulate_grad_at(r, c, b * g);
                        rhs.grid.accumulate_grad_at(r, c, a * g);
                    }
                }
            }
            GradFn::Scale { input, factor, out } => {
                for_each_element(input, out, |_, g| factor * g);
            }
            GradFn::MatrixMultiply { lhs, rhs, out } => {
                let (n, k) = lhs.grid.shape();
                let m = rhs.grid.cols();
                // grad_lhs += grad_out @ rhs^T
                for i in 0..n {
                    for kk in 0..k {
                        let sum: f64 = (0..m)
                            .map(|j| out.grad_at(i, j) * rhs.grid.data_at(kk, j))
                            .sum();
                        lhs.grid.accumulate_grad_at(i, kk, sum);
                    }
                }
                // grad_rhs += lhs^T @ grad_out
                for kk in 0..k {
                    for j in 0..m {
                        let sum: f64 = (0..n)
                            .map(|i| lhs.grid.data_at(i, kk) * out.grad_at(i, j))
                            .sum();
                        rhs.grid.accumulate_grad_at(kk, j, sum);
                    }
                }
            }
            GradFn::Power {
                input,
                exponent,
                out,
            } => {
                // x^0 is constant; 0 * 0^-1 would be NaN at x = 0.
                if *exponent == 0.0 {
                    return;
                }
                for_each_element(input, out, |x, g| exponent * x.powf(exponent - 1.0) * g);
            }
            GradFn::Sine { input, out } => {
                for_each_element(input, out, |x, g| x.cos() * g);
            }
            GradFn::Cosine { input, out } => {
                for_each_element(input, out, |x, g| -x.sin() * g);
            }
            GradFn::Log { input, out } => {
                for_each_element(input, out, |x, g| g / x);
            }
            GradFn::Exp { input, out } => {
                for_each_element(input, out, |x, g| x.exp() * g);
            }
            GradFn::Relu { input, out } => {
                for_each_element(input, out, |x, g| if x > 0.0 { g } else { 0.0 });
            }
            GradFn::Mean { input, out } => {
                let share = out.grad_at(0, 0) / input.grid.numel() as f64;
                for cell in input.grid.cells() {
                    cell.accumulate_grad(share);
                }
            }
            GradFn::AccumulateLeaf { leaf } => {
                for cell in leaf.cells() {
                    cell.accumulate_grad(1.0);
                }
            }
        }
    }
}

/// Applies an elementwise local derivative: `input.grad += local(x, g)`.
fn for_each_element<F>(input: &Operand, out: &Grid, local: F)
where
    F: Fn(f64, f64) -> f64,
{
    for r in 0..out.rows() {
        for c in 0..out.cols() {
            let x = input.grid.data_at(r, c);
            input
                .grid
                .accumulate_grad_at(r, c, local(x, out.grad_at(r, c)));
        }
    }
}

/// A node of the computation graph.
///
/// Created exactly once per operator application and referenced by the value
/// it produced. That reference is set at creation and never replaced.
pub struct Node {
    pub(crate) op: GradFn,
}

impl Node {
    pub(crate) fn new(op: GradFn) -> Rc<Node> {
        Rc::new(Node { op })
    }

    pub(crate) fn id(node: &Rc<Node>) -> NodeId {
        Rc::as_ptr(node)
    }

    pub fn kind(&self) -> OpKind {
        self.op.kind()
    }
}

impl Drop for Node {
    // Unlinks uniquely owned predecessors one at a time so that releasing a
    // long chain does not recurse once per node.
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Node>> = self
            .op
            .operands_mut()
            .into_iter()
            .filter_map(|operand| operand.grad_fn.take())
            .collect();
        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(node) {
                pending.extend(
                    node.op
                        .operands_mut()
                        .into_iter()
                        .filter_map(|operand| operand.grad_fn.take()),
                );
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Operand grids would print the whole upstream graph.
        write!(f, "Node({:?})", self.kind())
    }
}
