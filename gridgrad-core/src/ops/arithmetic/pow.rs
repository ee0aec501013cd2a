// gridgrad-core/src/ops/arithmetic/pow.rs

use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::apply_unary;

/// Raises every element to a constant exponent.
///
/// The exponent is a plain number, not a graph value; there is no gradient
/// with respect to it.
pub(crate) fn pow_op(input: &Operand, exponent: f64) -> Operand {
    apply_unary(
        input,
        |x| x.powf(exponent),
        |input, out| GradFn::Power {
            input,
            exponent,
            out,
        },
    )
}
