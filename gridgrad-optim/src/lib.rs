//! First-order optimizers for gridgrad parameters.
//!
//! An optimizer owns handles to the trainable [`Scalar`]s of a model (see
//! `Module::parameters`). `step()` reads each parameter's accumulated
//! gradient and writes a new value; it never touches the gradient itself,
//! so callers clear it with `zero_grad()` between iterations.

use gridgrad_core::{GridGradError, Scalar};

pub mod adam;
pub mod sgd;

pub use adam::{Adam, AdamOptions};
pub use sgd::Sgd;

/// Trait for optimization algorithms.
pub trait Optimizer {
    /// Performs a single optimization step (parameter update).
    fn step(&mut self) -> Result<(), GridGradError>;

    /// The parameters this optimizer updates.
    fn params(&self) -> &[Scalar];

    /// Clears the gradients of all parameters managed by the optimizer.
    /// Should be called before each backward pass, since gradients
    /// accumulate.
    fn zero_grad(&self) {
        for param in self.params() {
            param.zero_grad();
        }
    }
}

/// Rejects parameter lists an optimizer cannot update.
pub(crate) fn check_params(params: &[Scalar]) -> Result<(), GridGradError> {
    if params.iter().any(|p| !p.is_leaf() || !p.requires_grad()) {
        return Err(GridGradError::ConfigurationError(
            "optimizer parameters must be leaves that require grad".to_string(),
        ));
    }
    Ok(())
}

/// Logs a warning when a step is about to run on all-zero gradients, which
/// usually means `backward()` was not called.
pub(crate) fn warn_if_no_grad(name: &str, params: &[Scalar]) {
    if !params.is_empty() && params.iter().all(|p| p.grad() == 0.0) {
        log::warn!(
            "{} step on {} parameters with zero gradient. Was backward() called?",
            name,
            params.len()
        );
    }
}
