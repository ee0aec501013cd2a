//! Reverse-mode automatic differentiation.
//!
//! - [`backward_op`]: the closed set of gradient functions and the graph
//!   node that records one of them.
//! - [`graph`]: topological ordering and the backward pass itself.
//! - [`grad_check`]: finite-difference verification of analytical gradients.

pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;

pub use backward_op::{Node, NodeId, OpKind};
pub use grad_check::{check_grad, GradCheckError};
