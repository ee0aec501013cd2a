// src/scalar.rs

use std::fmt;

use num_traits::ToPrimitive;

use crate::autograd::backward_op::Operand;
use crate::autograd::{graph, OpKind};
use crate::error::GridGradError;
use crate::ops::activation::relu_op;
use crate::ops::arithmetic::{add_constant_op, add_op, multiply_op, pow_op, scale_op};
use crate::ops::math_elem::{cos_op, exp_op, ln_op, sin_op};
use crate::scalar_data::Grid;
use crate::types::DType;

/// A single differentiable number.
///
/// Internally a 1x1 value, so scalars and matrices share one operator set
/// and one backward engine. Cloning is shallow: clones share the value and
/// its gradient.
#[derive(Clone)]
pub struct Scalar {
    operand: Operand,
}

impl Scalar {
    /// Creates a leaf scalar. The value is coerced to `dtype`.
    pub fn new<T: ToPrimitive>(
        value: T,
        dtype: DType,
        requires_grad: bool,
    ) -> Result<Self, GridGradError> {
        let value = value.to_f64().ok_or_else(|| {
            GridGradError::UnsupportedOperation("scalar value is not representable as f64".to_string())
        })?;
        let grid = Grid::from_fn(1, 1, dtype, requires_grad, |_, _| value);
        Ok(Scalar::from_operand(Operand::leaf(grid)))
    }

    pub(crate) fn from_operand(operand: Operand) -> Self {
        Scalar { operand }
    }

    #[cfg(test)]
    pub(crate) fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn data(&self) -> f64 {
        self.operand.grid.data_at(0, 0)
    }

    /// Overwrites the value of a leaf, coercing it to the dtype. This is how
    /// optimizers update parameters.
    ///
    /// Values produced by an operator cannot be overwritten: their history
    /// would no longer describe them.
    pub fn set_data(&self, value: f64) -> Result<(), GridGradError> {
        if !self.is_leaf() {
            return Err(GridGradError::UnsupportedOperation(
                "set_data is only allowed on leaf scalars".to_string(),
            ));
        }
        self.operand.grid.cell(0, 0).set_data(value);
        Ok(())
    }

    /// Accumulated gradient. Always 0 for a scalar that does not track
    /// gradient.
    pub fn grad(&self) -> f64 {
        self.operand.grid.grad_at(0, 0)
    }

    pub fn dtype(&self) -> DType {
        self.operand.grid.dtype()
    }

    pub fn requires_grad(&self) -> bool {
        self.operand.grid.requires_grad()
    }

    /// Leaf scalars created with [`Scalar::new`] only. Scalars taken from a
    /// matrix (`element`, `parameters`) share the matrix's flag and cannot
    /// change it.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), GridGradError> {
        if !self.is_leaf() {
            return Err(GridGradError::UnsupportedOperation(
                "requires_grad can only be changed on a leaf scalar".to_string(),
            ));
        }
        if self.operand.grid.is_view() {
            return Err(GridGradError::UnsupportedOperation(
                "requires_grad cannot be changed on an element of a matrix".to_string(),
            ));
        }
        self.operand.grid.set_requires_grad(requires_grad);
        Ok(())
    }

    pub fn is_leaf(&self) -> bool {
        self.operand.grad_fn.is_none()
    }

    pub fn grad_fn_kind(&self) -> Option<OpKind> {
        self.operand.grad_fn.as_ref().map(|node| node.kind())
    }

    pub fn add(&self, other: &Scalar) -> Result<Scalar, GridGradError> {
        add_op(&self.operand, &other.operand).map(Scalar::from_operand)
    }

    /// Adds a literal. The literal is coerced to this scalar's dtype.
    pub fn add_scalar(&self, value: f64) -> Scalar {
        Scalar::from_operand(add_constant_op(&self.operand, value))
    }

    pub fn sub(&self, other: &Scalar) -> Result<Scalar, GridGradError> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Scalar) -> Result<Scalar, GridGradError> {
        multiply_op(&self.operand, &other.operand).map(Scalar::from_operand)
    }

    /// `self * other^-1`. Division by zero follows IEEE rules.
    pub fn div(&self, other: &Scalar) -> Result<Scalar, GridGradError> {
        self.mul(&other.pow(-1.0))
    }

    /// Multiplies by a literal.
    pub fn mul_scalar(&self, factor: f64) -> Scalar {
        Scalar::from_operand(scale_op(&self.operand, factor))
    }

    pub fn neg(&self) -> Scalar {
        self.mul_scalar(-1.0)
    }

    pub fn pow(&self, exponent: f64) -> Scalar {
        Scalar::from_operand(pow_op(&self.operand, exponent))
    }

    pub fn relu(&self) -> Scalar {
        Scalar::from_operand(relu_op(&self.operand))
    }

    pub fn sin(&self) -> Scalar {
        Scalar::from_operand(sin_op(&self.operand))
    }

    pub fn cos(&self) -> Scalar {
        Scalar::from_operand(cos_op(&self.operand))
    }

    pub fn ln(&self) -> Scalar {
        Scalar::from_operand(ln_op(&self.operand))
    }

    pub fn exp(&self) -> Scalar {
        Scalar::from_operand(exp_op(&self.operand))
    }

    /// Back-propagates from this scalar with seed 1.
    pub fn backward(&self) -> Result<(), GridGradError> {
        graph::backward(&self.operand, "backward")
    }

    /// Resets the gradient to 0. A no-op for untracked scalars.
    pub fn zero_grad(&self) {
        self.operand.grid.fill_grad(0.0);
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scalar(data={}, grad={}, dtype={:?}, grad_fn={:?})",
            self.data(),
            self.grad(),
            self.dtype(),
            self.grad_fn_kind()
        )
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scalar(data = {}, grad = {}, dtype = {:?})",
            self.data(),
            self.grad(),
            self.dtype()
        )
    }
}
