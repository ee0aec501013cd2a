// gridgrad-core/src/ops/arithmetic/add.rs

use crate::autograd::backward_op::{GradFn, Operand};
use crate::error::GridGradError;
use crate::ops::{check_same_dtype, record, shape_mismatch};
use crate::scalar_data::Grid;

/// Result shape of `lhs + rhs`: equal shapes, or one side a single row with
/// the same column count (bias broadcast).
pub(crate) fn broadcast_shape(lhs: (usize, usize), rhs: (usize, usize)) -> Option<(usize, usize)> {
    if lhs == rhs {
        Some(lhs)
    } else if lhs.1 != rhs.1 {
        None
    } else if rhs.0 == 1 {
        Some(lhs)
    } else if lhs.0 == 1 {
        Some(rhs)
    } else {
        None
    }
}

/// Elementwise addition with single-row broadcasting.
pub(crate) fn add_op(lhs: &Operand, rhs: &Operand) -> Result<Operand, GridGradError> {
    let dtype = check_same_dtype("add", lhs, rhs)?;
    let (rows, cols) = broadcast_shape(lhs.grid.shape(), rhs.grid.shape())
        .ok_or_else(|| shape_mismatch("add", lhs, rhs))?;

    let requires_grad = lhs.grid.requires_grad() || rhs.grid.requires_grad();
    let out = Grid::from_fn(rows, cols, dtype, requires_grad, |r, c| {
        lhs.grid.data_at(lhs.source_row(r), c) + rhs.grid.data_at(rhs.source_row(r), c)
    });

    Ok(record(out, requires_grad, |out| GradFn::Add {
        lhs: lhs.clone(),
        rhs: rhs.clone(),
        out,
    }))
}

/// Adds a literal to every element. The literal becomes an untracked
/// operand of the input's shape and dtype, so this records a plain `Add`.
pub(crate) fn add_constant_op(input: &Operand, value: f64) -> Operand {
    let grid = &input.grid;
    let (rows, cols) = grid.shape();
    let constant = Operand::leaf(Grid::from_fn(rows, cols, grid.dtype(), false, |_, _| value));
    let requires_grad = grid.requires_grad();
    let out = Grid::from_fn(rows, cols, grid.dtype(), requires_grad, |r, c| {
        grid.data_at(r, c) + constant.grid.data_at(r, c)
    });
    record(out, requires_grad, |out| GradFn::Add {
        lhs: input.clone(),
        rhs: constant,
        out,
    })
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
