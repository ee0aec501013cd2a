use thiserror::Error;

use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::types::DType;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check requires a floating-point input, input {input_index} is {dtype:?}")]
    UnsupportedDType { input_index: usize, dtype: DType },
    #[error("Gradient check input must be a leaf. Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad to its output.")]
    RequiresGradPropagationError,
    #[error("Engine error during gradient check: {0}")]
    Engine(#[from] GridGradError),
}

/// Compares the gradients produced by `backward()` against central finite
/// differences `(f(x + eps) - f(x - eps)) / 2eps`, one element at a time.
///
/// `func` is re-run for every perturbation, so it must rebuild its graph
/// from the current input values on each call. Inputs that do not require
/// grad are used as constants and skipped. Every perturbed element is
/// restored before the function returns, and the input gradients hold the
/// analytical result afterwards.
///
/// A pair passes when the absolute or relative difference is within
/// `tolerance`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Matrix],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Matrix]) -> Result<Scalar, GridGradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.dtype().is_integer() {
            return Err(GradCheckError::UnsupportedDType {
                input_index: i,
                dtype: input.dtype(),
            });
        }
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        if input.requires_grad() {
            input.zero_grad()?;
        }
    }

    let output = func(inputs)?;
    if inputs.iter().any(|m| m.requires_grad()) && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if !output.requires_grad() {
        return Ok(());
    }
    output.backward()?;

    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let grid = &input.operand().grid;
        for (elem_idx, cell) in grid.cells().iter().enumerate() {
            let analytical = cell.grad();
            let original = cell.data();

            cell.set_data(original + epsilon);
            let loss_plus = func(inputs).map(|s| s.data());
            cell.set_data(original - epsilon);
            let loss_minus = func(inputs).map(|s| s.data());
            cell.set_data(original);
            let (loss_plus, loss_minus) = (loss_plus?, loss_minus?);

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            log::trace!(
                "grad check input {} element {}: analytical {} numerical {}",
                i,
                elem_idx,
                analytical,
                numerical
            );
            if !approx::relative_eq!(
                analytical,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical,
                    numerical,
                    difference: (analytical - numerical).abs(),
                });
            }
        }
    }
    Ok(())
}
