use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::apply_unary;

pub(crate) fn sin_op(input: &Operand) -> Operand {
    apply_unary(input, f64::sin, |input, out| GradFn::Sine { input, out })
}

pub(crate) fn cos_op(input: &Operand) -> Operand {
    apply_unary(input, f64::cos, |input, out| GradFn::Cosine { input, out })
}
