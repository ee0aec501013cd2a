// src/matrix/arithmetic_methods.rs

use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::ops::activation::relu_op;
use crate::ops::arithmetic::{add_constant_op, add_op, multiply_op, pow_op, scale_op};
use crate::ops::linalg::matmul_op;
use crate::ops::math_elem::{cos_op, exp_op, ln_op, sin_op};
use crate::ops::reduction::mean_op;
use crate::scalar::Scalar;

/// Differentiable operators. Each call records at most one graph node, and
/// only when an operand requires grad.
impl Matrix {
    /// Elementwise sum. Either side may be a single row with the same number
    /// of columns, which is repeated over the other side's rows.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, GridGradError> {
        add_op(&self.operand, &other.operand).map(Matrix::from_operand)
    }

    /// Adds a literal to every element.
    pub fn add_scalar(&self, value: f64) -> Matrix {
        Matrix::from_operand(add_constant_op(&self.operand, value))
    }

    /// `self + (-1 * other)`, with the same broadcasting as [`Matrix::add`].
    pub fn sub(&self, other: &Matrix) -> Result<Matrix, GridGradError> {
        self.add(&other.neg())
    }

    pub fn neg(&self) -> Matrix {
        self.scale(-1.0)
    }

    /// Elementwise product; shapes must match.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, GridGradError> {
        multiply_op(&self.operand, &other.operand).map(Matrix::from_operand)
    }

    /// Multiplies every element by a literal.
    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix::from_operand(scale_op(&self.operand, factor))
    }

    /// Elementwise quotient `self * other^-1`; shapes must match. Division by
    /// zero follows IEEE rules.
    pub fn div(&self, other: &Matrix) -> Result<Matrix, GridGradError> {
        self.multiply(&other.pow(-1.0))
    }

    /// Divides every element by a literal.
    pub fn div_scalar(&self, divisor: f64) -> Matrix {
        self.scale(divisor.recip())
    }

    /// Elementwise `numerator / self`, for a literal numerator.
    pub fn rdiv_scalar(&self, numerator: f64) -> Matrix {
        self.pow(-1.0).scale(numerator)
    }

    /// Matrix product. `self.cols()` must equal `other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, GridGradError> {
        matmul_op(&self.operand, &other.operand).map(Matrix::from_operand)
    }

    pub fn pow(&self, exponent: f64) -> Matrix {
        Matrix::from_operand(pow_op(&self.operand, exponent))
    }

    pub fn relu(&self) -> Matrix {
        Matrix::from_operand(relu_op(&self.operand))
    }

    pub fn sin(&self) -> Matrix {
        Matrix::from_operand(sin_op(&self.operand))
    }

    pub fn cos(&self) -> Matrix {
        Matrix::from_operand(cos_op(&self.operand))
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Matrix {
        Matrix::from_operand(ln_op(&self.operand))
    }

    pub fn exp(&self) -> Matrix {
        Matrix::from_operand(exp_op(&self.operand))
    }

    /// Arithmetic mean of all elements.
    pub fn mean(&self) -> Scalar {
        Scalar::from_operand(mean_op(&self.operand))
    }
}
