// src/matrix/view_methods.rs

use crate::autograd::backward_op::Operand;
use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::scalar_data::Grid;

/// Views share their elements with the source and keep the source's
/// producer, so no graph node is recorded and gradient written through a
/// view is gradient of the source.
impl Matrix {
    /// Swaps rows and columns. `t.get(c, r) == m.get(r, c)`, and both refer
    /// to the same element.
    pub fn transpose(&self) -> Matrix {
        self.view(self.operand.grid.transposed())
    }

    /// The `index`-th row as a `1 x cols` view.
    pub fn row(&self, index: usize) -> Result<Matrix, GridGradError> {
        let rows = self.rows();
        if index >= rows {
            return Err(GridGradError::IndexOutOfBounds { index, len: rows });
        }
        Ok(self.view(self.operand.grid.row(index)))
    }

    /// The element at `(row, col)` as a [`Scalar`] sharing its storage.
    pub fn element(&self, row: usize, col: usize) -> Result<Scalar, GridGradError> {
        self.check_index(row, col)?;
        let cell = self.operand.grid.cell(row, col).clone();
        Ok(Scalar::from_operand(Operand {
            grid: Grid::from_cell(cell),
            grad_fn: self.operand.grad_fn.clone(),
        }))
    }

    fn view(&self, grid: Grid) -> Matrix {
        Matrix::from_operand(Operand {
            grid,
            grad_fn: self.operand.grad_fn.clone(),
        })
    }
}
