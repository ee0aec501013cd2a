// gridgrad-core/src/ops/reduction/mean.rs

use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::record;
use crate::scalar_data::Grid;

/// Mean of all elements as a 1x1 value.
///
/// Recorded as a single node so the backward pass hands each element
/// `grad / numel` directly instead of replaying a chain of additions.
pub(crate) fn mean_op(input: &Operand) -> Operand {
    let grid = &input.grid;
    let total: f64 = grid.cells().iter().map(|cell| cell.data()).sum();
    let mean = total / grid.numel() as f64;
    let requires_grad = grid.requires_grad();
    let out = Grid::from_fn(1, 1, grid.dtype(), requires_grad, |_, _| mean);
    record(out, requires_grad, |out| GradFn::Mean {
        input: input.clone(),
        out,
    })
}
