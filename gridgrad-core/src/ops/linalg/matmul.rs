// gridgrad-core/src/ops/linalg/matmul.rs

use crate::autograd::backward_op::{GradFn, Operand};
use crate::error::GridGradError;
use crate::ops::{check_same_dtype, record, shape_mismatch};
use crate::scalar_data::Grid;

/// Matrix product `(n x k) @ (k x m) -> (n x m)`.
///
/// The inner dimensions are checked before anything is computed.
pub(crate) fn matmul_op(lhs: &Operand, rhs: &Operand) -> Result<Operand, GridGradError> {
    let dtype = check_same_dtype("matmul", lhs, rhs)?;
    let (n, k) = lhs.grid.shape();
    let (k2, m) = rhs.grid.shape();
    if k != k2 {
        return Err(shape_mismatch("matmul", lhs, rhs));
    }

    let requires_grad = lhs.grid.requires_grad() || rhs.grid.requires_grad();
    let out = Grid::from_fn(n, m, dtype, requires_grad, |i, j| {
        (0..k)
            .map(|kk| lhs.grid.data_at(i, kk) * rhs.grid.data_at(kk, j))
            .sum()
    });
    log::trace!("matmul {}x{} @ {}x{}", n, k, k2, m);

    Ok(record(out, requires_grad, |out| GradFn::MatrixMultiply {
        lhs: lhs.clone(),
        rhs: rhs.clone(),
        out,
    }))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
