use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::apply_unary;

/// Natural logarithm. Non-positive inputs follow `f64::ln` (NaN or -inf).
pub(crate) fn ln_op(input: &Operand) -> Operand {
    apply_unary(input, f64::ln, |input, out| GradFn::Log { input, out })
}

#[cfg(test)]
mod tests {
    use crate::types::DType;
    use crate::{Matrix, OpKind};

    #[test]
    fn test_ln_backward_is_reciprocal() {
        let a = Matrix::new(vec![vec![1.0, 4.0]], DType::F64, true).unwrap();
        let l = a.ln();
        assert_eq!(l.grad_fn_kind(), Some(OpKind::Log));
        assert_eq!(l.data()[0][0], 0.0);
        l.backward().unwrap();
        assert_eq!(a.grad().unwrap(), vec![vec![1.0, 0.25]]);
    }

    #[test]
    fn test_ln_of_zero() {
        let a = Matrix::new(vec![vec![0.0]], DType::F64, false).unwrap();
        assert_eq!(a.ln().data()[0][0], f64::NEG_INFINITY);
    }
}
