// gridgrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::backward_op::{GradFn, Operand};
use crate::error::GridGradError;
use crate::ops::{apply_unary, check_same_dtype, record, shape_mismatch};
use crate::scalar_data::Grid;

/// Elementwise (Hadamard) product. Shapes must match exactly.
pub(crate) fn multiply_op(lhs: &Operand, rhs: &Operand) -> Result<Operand, GridGradError> {
    let dtype = check_same_dtype("multiply", lhs, rhs)?;
    if lhs.grid.shape() != rhs.grid.shape() {
        return Err(shape_mismatch("multiply", lhs, rhs));
    }
    let (rows, cols) = lhs.grid.shape();
    let requires_grad = lhs.grid.requires_grad() || rhs.grid.requires_grad();
    let out = Grid::from_fn(rows, cols, dtype, requires_grad, |r, c| {
        lhs.grid.data_at(r, c) * rhs.grid.data_at(r, c)
    });
    Ok(record(out, requires_grad, |out| GradFn::Multiply {
        lhs: lhs.clone(),
        rhs: rhs.clone(),
        out,
    }))
}

/// Product with a numeric literal.
pub(crate) fn scale_op(input: &Operand, factor: f64) -> Operand {
    apply_unary(
        input,
        |x| x * factor,
        |input, out| GradFn::Scale { input, factor, out },
    )
}
