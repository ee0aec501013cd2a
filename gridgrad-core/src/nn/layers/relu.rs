use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::nn::module::Module;
use crate::scalar::Scalar;

/// Layer that applies the Rectified Linear Unit (ReLU) activation function.
///
/// This layer does not have any learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct ReLU {}

impl ReLU {
    pub fn new() -> Self {
        ReLU {}
    }
}

impl Module for ReLU {
    fn forward(&self, input: &Matrix) -> Result<Matrix, GridGradError> {
        Ok(input.relu())
    }

    fn parameters(&self) -> Vec<Scalar> {
        Vec::new()
    }
}
