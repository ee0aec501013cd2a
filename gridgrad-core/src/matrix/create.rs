// src/matrix/create.rs

use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::types::DType;

fn check_shape(rows: usize, cols: usize) -> Result<(), GridGradError> {
    if rows == 0 || cols == 0 {
        return Err(GridGradError::EmptyMatrix);
    }
    Ok(())
}

fn from_values(
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    dtype: DType,
    requires_grad: bool,
) -> Result<Matrix, GridGradError> {
    check_shape(rows, cols)?;
    Ok(Matrix::from_flat(rows, cols, &values, dtype, requires_grad))
}

/// Creates a `rows x cols` leaf filled with zeros.
pub fn zeros(
    rows: usize,
    cols: usize,
    dtype: DType,
    requires_grad: bool,
) -> Result<Matrix, GridGradError> {
    full(rows, cols, 0.0, dtype, requires_grad)
}

/// Creates a `rows x cols` leaf filled with ones.
pub fn ones(
    rows: usize,
    cols: usize,
    dtype: DType,
    requires_grad: bool,
) -> Result<Matrix, GridGradError> {
    full(rows, cols, 1.0, dtype, requires_grad)
}

/// Creates a `rows x cols` leaf filled with `value`.
pub fn full(
    rows: usize,
    cols: usize,
    value: f64,
    dtype: DType,
    requires_grad: bool,
) -> Result<Matrix, GridGradError> {
    from_values(rows, cols, vec![value; rows * cols], dtype, requires_grad)
}

/// Samples every element uniformly from `[0, 1)` using the caller's
/// generator. The same seed always yields the same matrix.
pub fn rand<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    dtype: DType,
    requires_grad: bool,
    rng: &mut R,
) -> Result<Matrix, GridGradError> {
    uniform(rows, cols, 0.0, 1.0, dtype, requires_grad, rng)
}

/// Samples every element uniformly from `[low, high)`.
pub fn uniform<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    low: f64,
    high: f64,
    dtype: DType,
    requires_grad: bool,
    rng: &mut R,
) -> Result<Matrix, GridGradError> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(GridGradError::ConfigurationError(format!(
            "uniform range must be finite with low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    let values: Vec<f64> = (0..rows * cols).map(|_| dist.sample(rng)).collect();
    from_values(rows, cols, values, dtype, requires_grad)
}

/// Samples every element from the standard normal distribution N(0, 1)
/// using the caller's generator.
pub fn randn<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    dtype: DType,
    requires_grad: bool,
    rng: &mut R,
) -> Result<Matrix, GridGradError> {
    let values: Vec<f64> = (0..rows * cols)
        .map(|_| StandardNormal.sample(rng))
        .collect();
    from_values(rows, cols, values, dtype, requires_grad)
}
