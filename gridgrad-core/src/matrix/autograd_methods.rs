// src/matrix/autograd_methods.rs

use crate::autograd::backward_op::Operand;
use crate::autograd::{graph, OpKind};
use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::scalar_data::Grid;

impl Matrix {
    /// Whether this matrix participates in gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.operand.grid.requires_grad()
    }

    /// Turns gradient tracking on or off for every element.
    ///
    /// Only leaves can change the flag: a value produced by an operator is
    /// tracked exactly when one of its inputs was. Views (`row`, `transpose`)
    /// are rejected too, since they share their elements with a source that
    /// must keep one flag for all of its elements.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), GridGradError> {
        if !self.is_leaf() {
            return Err(GridGradError::UnsupportedOperation(
                "requires_grad can only be changed on a leaf matrix".to_string(),
            ));
        }
        if self.operand.grid.is_view() {
            return Err(GridGradError::UnsupportedOperation(
                "requires_grad cannot be changed through a view, change it on the source matrix"
                    .to_string(),
            ));
        }
        self.operand.grid.set_requires_grad(requires_grad);
        Ok(())
    }

    /// True when no operator produced this matrix.
    pub fn is_leaf(&self) -> bool {
        self.operand.grad_fn.is_none()
    }

    /// The operator that produced this matrix, if any.
    pub fn grad_fn_kind(&self) -> Option<OpKind> {
        self.operand.grad_fn.as_ref().map(|node| node.kind())
    }

    /// Gradient accumulated into each element, or `None` when the matrix does
    /// not track gradient.
    pub fn grad(&self) -> Option<Vec<Vec<f64>>> {
        if self.requires_grad() {
            Some(self.operand.grid.grad_rows())
        } else {
            None
        }
    }

    /// Back-propagates from this matrix, treating every element as seeded
    /// with 1 (the gradient of the sum of all elements).
    ///
    /// Leaf gradients accumulate across calls; use [`Matrix::zero_grad`]
    /// between passes.
    pub fn backward(&self) -> Result<(), GridGradError> {
        graph::backward(&self.operand, "backward")
    }

    /// Resets the gradient of every element to zero. Calling it twice is the
    /// same as calling it once.
    pub fn zero_grad(&self) -> Result<(), GridGradError> {
        if !self.requires_grad() {
            return Err(GridGradError::RequiresGradNotMet {
                operation: "zero_grad".to_string(),
            });
        }
        self.operand.grid.fill_grad(0.0);
        Ok(())
    }

    /// Every element as an individual trainable leaf [`Scalar`], row-major.
    ///
    /// The scalars share storage with the matrix, so updating one updates
    /// the matrix.
    pub fn parameters(&self) -> Result<Vec<Scalar>, GridGradError> {
        if !self.requires_grad() {
            return Err(GridGradError::RequiresGradNotMet {
                operation: "parameters".to_string(),
            });
        }
        if !self.is_leaf() {
            return Err(GridGradError::UnsupportedOperation(
                "parameters are only defined for leaf matrices".to_string(),
            ));
        }
        Ok(self
            .operand
            .grid
            .cells()
            .iter()
            .map(|cell| Scalar::from_operand(Operand::leaf(Grid::from_cell(cell.clone()))))
            .collect())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
