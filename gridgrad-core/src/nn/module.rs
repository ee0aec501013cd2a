use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// The base trait for all neural network modules (layers, containers).
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass, recording the graph for `backward()`.
    fn forward(&self, input: &Matrix) -> Result<Matrix, GridGradError>;

    /// Every trainable scalar of the module, sub-modules included.
    ///
    /// The scalars share storage with the module's weights, so optimizers
    /// update the module through them.
    fn parameters(&self) -> Vec<Scalar>;

    /// Resets the gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}
