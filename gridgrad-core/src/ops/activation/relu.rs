use crate::autograd::backward_op::{GradFn, Operand};
use crate::ops::apply_unary;

/// `max(x, 0)` elementwise. The derivative at exactly zero is taken as 0.
pub(crate) fn relu_op(input: &Operand) -> Operand {
    apply_unary(
        input,
        |x| if x > 0.0 { x } else { 0.0 },
        |input, out| GradFn::Relu { input, out },
    )
}

#[cfg(test)]
mod tests {
    use crate::types::DType;
    use crate::{Matrix, OpKind};

    #[test]
    fn test_relu_forward_backward() {
        let a = Matrix::new(vec![vec![-1.0, 0.0, 2.5]], DType::F64, true).unwrap();
        let b = a.relu();
        assert_eq!(b.data(), vec![vec![0.0, 0.0, 2.5]]);
        assert_eq!(b.grad_fn_kind(), Some(OpKind::Relu));
        b.backward().unwrap();
        assert_eq!(a.grad().unwrap(), vec![vec![0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_relu_integer() {
        let a = Matrix::new(vec![vec![-3, 4]], DType::I64, false).unwrap();
        assert_eq!(a.relu().data(), vec![vec![0.0, 4.0]]);
    }
}
