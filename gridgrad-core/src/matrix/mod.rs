// src/matrix/mod.rs

use std::fmt;

use num_traits::ToPrimitive;

use crate::autograd::backward_op::Operand;
use crate::error::GridGradError;
use crate::scalar_data::Grid;
use crate::types::DType;

mod arithmetic_methods;
mod autograd_methods;
pub mod create;
mod view_methods;

pub use create::{full, ones, rand, randn, uniform, zeros};

/// A two-dimensional, row-major grid of differentiable scalars.
///
/// Cloning a `Matrix` is shallow: the clone shares every element, including
/// its gradient accumulator. Views (`transpose`, `row`, `element`) share
/// elements with their source the same way, so gradient written through a
/// view lands in the source.
#[derive(Clone)]
pub struct Matrix {
    pub(crate) operand: Operand,
}

impl Matrix {
    /// Creates a leaf matrix from nested rows.
    ///
    /// Every value is converted to `f64` and then coerced to `dtype`.
    ///
    /// # Errors
    /// - `EmptyMatrix` if there are no rows or the first row is empty.
    /// - `RaggedRows` if any row length differs from the first.
    pub fn new<T: ToPrimitive>(
        data: Vec<Vec<T>>,
        dtype: DType,
        requires_grad: bool,
    ) -> Result<Self, GridGradError> {
        let (rows, cols) = validate_rows(&data)?;
        let mut values = Vec::with_capacity(rows * cols);
        for row in &data {
            for value in row {
                let value = value.to_f64().ok_or_else(|| {
                    GridGradError::UnsupportedOperation(
                        "matrix element is not representable as f64".to_string(),
                    )
                })?;
                values.push(value);
            }
        }
        Ok(Self::from_flat(rows, cols, &values, dtype, requires_grad))
    }

    /// Leaf matrix from a row-major slice whose length is `rows * cols`.
    pub(crate) fn from_flat(
        rows: usize,
        cols: usize,
        values: &[f64],
        dtype: DType,
        requires_grad: bool,
    ) -> Self {
        let grid = Grid::from_fn(rows, cols, dtype, requires_grad, |r, c| values[r * cols + c]);
        Matrix::from_operand(Operand::leaf(grid))
    }

    pub(crate) fn from_operand(operand: Operand) -> Self {
        Matrix { operand }
    }

    pub(crate) fn operand(&self) -> &Operand {
        &self.operand
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.operand.grid.shape()
    }

    pub fn rows(&self) -> usize {
        self.operand.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.operand.grid.cols()
    }

    pub fn numel(&self) -> usize {
        self.operand.grid.numel()
    }

    pub fn dtype(&self) -> DType {
        self.operand.grid.dtype()
    }

    /// Copy of the element values, row by row.
    pub fn data(&self) -> Vec<Vec<f64>> {
        self.operand.grid.data_rows()
    }

    /// Copy of the element values flattened in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.operand.grid.cells().iter().map(|cell| cell.data()).collect()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, GridGradError> {
        self.check_index(row, col)?;
        Ok(self.operand.grid.data_at(row, col))
    }

    /// A fresh leaf holding a copy of the current values, with no history and
    /// no gradient tracking.
    pub fn detach(&self) -> Matrix {
        let (rows, cols) = self.shape();
        Matrix::from_flat(rows, cols, &self.to_vec(), self.dtype(), false)
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> Result<(), GridGradError> {
        let (rows, cols) = self.shape();
        if row >= rows {
            return Err(GridGradError::IndexOutOfBounds { index: row, len: rows });
        }
        if col >= cols {
            return Err(GridGradError::IndexOutOfBounds { index: col, len: cols });
        }
        Ok(())
    }
}

/// Checks that nested rows form a non-empty rectangle.
pub(crate) fn validate_rows<T>(data: &[Vec<T>]) -> Result<(usize, usize), GridGradError> {
    let cols = match data.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(GridGradError::EmptyMatrix),
    };
    for (row, values) in data.iter().enumerate() {
        if values.len() != cols {
            return Err(GridGradError::RaggedRows {
                row,
                expected: cols,
                actual: values.len(),
            });
        }
    }
    Ok((data.len(), cols))
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matrix(shape={:?}, dtype={:?}, requires_grad={}, grad_fn={:?})",
            self.shape(),
            self.dtype(),
            self.requires_grad(),
            self.grad_fn_kind()
        )
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix(data = {:?}, dtype = {:?}", self.data(), self.dtype())?;
        if self.requires_grad() {
            write!(f, ", grad = {:?}", self.operand.grid.grad_rows())?;
        }
        write!(f, ")")
    }
}
