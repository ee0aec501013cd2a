use rand::Rng;

use crate::error::GridGradError;
use crate::matrix::{create, Matrix};
use crate::nn::module::Module;
use crate::scalar::Scalar;
use crate::types::DType;

/// Applies an affine transformation to each input row: `y = x @ W + b`.
///
/// `weight` is `in_features x out_features` and `bias` is a single
/// `1 x out_features` row broadcast over the batch.
#[derive(Debug)]
pub struct Linear {
    weight: Matrix,
    bias: Matrix,
    params: Vec<Scalar>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with weight and bias drawn uniformly from
    /// `[-1/sqrt(in_features), 1/sqrt(in_features))`.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        dtype: DType,
        rng: &mut R,
    ) -> Result<Self, GridGradError> {
        if in_features == 0 || out_features == 0 {
            return Err(GridGradError::ConfigurationError(format!(
                "Linear layer needs non-zero features, got {} -> {}",
                in_features, out_features
            )));
        }
        let bound = 1.0 / (in_features as f64).sqrt();
        let weight = create::uniform(in_features, out_features, -bound, bound, dtype, true, rng)?;
        let bias = create::uniform(1, out_features, -bound, bound, dtype, true, rng)?;
        Self::from_parts(weight, bias)
    }

    /// Builds a layer around existing leaves. Both are switched to track
    /// gradient.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `bias` is `1 x weight.cols()`; `TypeMismatch`
    /// if the dtypes differ; `UnsupportedOperation` if either is not a leaf
    /// or is a view of another matrix.
    pub fn from_parts(weight: Matrix, bias: Matrix) -> Result<Self, GridGradError> {
        let (in_features, out_features) = weight.shape();
        if bias.shape() != (1, out_features) {
            return Err(GridGradError::ShapeMismatch {
                operation: "Linear::from_parts".to_string(),
                lhs: vec![1, out_features],
                rhs: vec![bias.rows(), bias.cols()],
            });
        }
        if weight.dtype() != bias.dtype() {
            return Err(GridGradError::TypeMismatch {
                operation: "Linear::from_parts".to_string(),
                expected: weight.dtype(),
                actual: bias.dtype(),
            });
        }
        weight.set_requires_grad(true)?;
        bias.set_requires_grad(true)?;

        let mut params = weight.parameters()?;
        params.extend(bias.parameters()?);
        Ok(Linear {
            weight,
            bias,
            params,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Matrix {
        &self.weight
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Matrix) -> Result<Matrix, GridGradError> {
        input.matmul(&self.weight)?.add(&self.bias)
    }

    /// Weight elements row-major, then bias elements.
    fn parameters(&self) -> Vec<Scalar> {
        self.params.clone()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
