// gridgrad-core/src/nn/losses/mse.rs

use std::str::FromStr;

use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Specifies the reduction to apply to the squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reduction {
    type Err = GridGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(GridGradError::ConfigurationError(format!(
                "Unsupported reduction type: {}",
                s
            ))),
        }
    }
}

/// Mean squared error between a prediction and a target of the same shape.
///
/// Built entirely from engine operators, so no dedicated gradient function
/// is needed: `mean((input - target)^2)`.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn forward(&self, input: &Matrix, target: &Matrix) -> Result<Scalar, GridGradError> {
        if input.shape() != target.shape() {
            return Err(GridGradError::ShapeMismatch {
                operation: "mse_loss".to_string(),
                lhs: vec![input.rows(), input.cols()],
                rhs: vec![target.rows(), target.cols()],
            });
        }
        let squared = input.sub(target)?.pow(2.0);
        let mean = squared.mean();
        Ok(match self.reduction {
            Reduction::Mean => mean,
            Reduction::Sum => mean.mul_scalar(squared.numel() as f64),
        })
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
