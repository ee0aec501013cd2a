use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::apply_unary;

pub(crate) fn exp_op(input: &Operand) -> Operand {
    apply_unary(input, f64::exp, |input, out| GradFn::Exp { input, out })
}
