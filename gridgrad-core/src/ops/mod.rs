//! # Operators (`ops`)
//!
//! Each operator has a core `xxx_op` function that validates its operands,
//! computes the forward result and, when any operand tracks gradient,
//! records the matching [`GradFn`](crate::autograd) variant on the output.
//! The functions work on internal operands so `Matrix` and `Scalar` share
//! them; the public surface is the methods on those types.
//!
//! - [`arithmetic`]: add, multiply, scale, power.
//! - [`linalg`]: matrix multiply.
//! - [`activation`]: relu.
//! - [`math_elem`]: sin, cos, ln, exp.
//! - [`reduction`]: mean.

pub(crate) mod activation;
pub(crate) mod arithmetic;
pub(crate) mod linalg;
pub(crate) mod math_elem;
pub(crate) mod reduction;

use crate::autograd::backward_op::{GradFn, Node, Operand};
use crate::error::GridGradError;
use crate::scalar_data::Grid;
use crate::types::DType;

/// Wraps a freshly computed grid, attaching a node built by `make` when the
/// result tracks gradient.
pub(crate) fn record<F>(out: Grid, requires_grad: bool, make: F) -> Operand
where
    F: FnOnce(Grid) -> GradFn,
{
    if requires_grad {
        let node = Node::new(make(out.clone()));
        Operand {
            grid: out,
            grad_fn: Some(node),
        }
    } else {
        Operand::leaf(out)
    }
}

pub(crate) fn check_same_dtype(
    operation: &str,
    lhs: &Operand,
    rhs: &Operand,
) -> Result<DType, GridGradError> {
    let expected = lhs.grid.dtype();
    let actual = rhs.grid.dtype();
    if expected != actual {
        return Err(GridGradError::TypeMismatch {
            operation: operation.to_string(),
            expected,
            actual,
        });
    }
    Ok(expected)
}

pub(crate) fn shape_mismatch(operation: &str, lhs: &Operand, rhs: &Operand) -> GridGradError {
    let (lr, lc) = lhs.grid.shape();
    let (rr, rc) = rhs.grid.shape();
    GridGradError::ShapeMismatch {
        operation: operation.to_string(),
        lhs: vec![lr, lc],
        rhs: vec![rr, rc],
    }
}

/// Elementwise unary operator: `out[r][c] = f(input[r][c])`.
pub(crate) fn apply_unary<F, M>(input: &Operand, f: F, make: M) -> Operand
where
    F: Fn(f64) -> f64,
    M: FnOnce(Operand, Grid) -> GradFn,
{
    let grid = &input.grid;
    let requires_grad = grid.requires_grad();
    let out = Grid::from_fn(
        grid.rows(),
        grid.cols(),
        grid.dtype(),
        requires_grad,
        |r, c| f(grid.data_at(r, c)),
    );
    record(out, requires_grad, |out| make(input.clone(), out))
}
