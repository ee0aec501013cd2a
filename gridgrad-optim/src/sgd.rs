// gridgrad-optim/src/sgd.rs

use gridgrad_core::{GridGradError, Scalar};

use crate::{check_params, warn_if_no_grad, Optimizer};

/// Implements plain stochastic gradient descent.
///
/// Updates every parameter `p` according to the rule:
/// `p = p - lr * grad(p)`
#[derive(Debug)]
pub struct Sgd {
    params: Vec<Scalar>,
    lr: f64,
}

impl Sgd {
    /// # Errors
    /// `ConfigurationError` if `lr` is not a positive finite number or a
    /// parameter is not a tracked leaf.
    pub fn new(params: Vec<Scalar>, lr: f64) -> Result<Self, GridGradError> {
        if !(lr.is_finite() && lr > 0.0) {
            return Err(GridGradError::ConfigurationError(format!(
                "Invalid learning rate: {}",
                lr
            )));
        }
        check_params(&params)?;
        Ok(Sgd { params, lr })
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), GridGradError> {
        warn_if_no_grad("SGD", &self.params);
        for param in &self.params {
            param.set_data(param.data() - self.lr * param.grad())?;
        }
        Ok(())
    }

    fn params(&self) -> &[Scalar] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridgrad_core::{DType, Matrix};

    fn params_with_grad() -> (Matrix, Vec<Scalar>) {
        let w = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], DType::F64, true).unwrap();
        // grad = [[10, -20], [0.5, -0.5]]
        let g = Matrix::new(vec![vec![10.0, -20.0], vec![0.5, -0.5]], DType::F64, false).unwrap();
        w.multiply(&g).unwrap().backward().unwrap();
        let params = w.parameters().unwrap();
        (w, params)
    }

    #[test]
    fn test_sgd_step() {
        let (w, params) = params_with_grad();
        let mut optim = Sgd::new(params, 0.1).unwrap();
        optim.step().unwrap();

        let data = w.to_vec();
        let expected = [0.0, 4.0, 2.95, 4.05];
        for (a, e) in data.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
        // step leaves the gradient alone
        assert_eq!(w.grad().unwrap()[0][0], 10.0);
    }

    #[test]
    fn test_sgd_zero_grad() {
        let (w, params) = params_with_grad();
        let optim = Sgd::new(params, 0.1).unwrap();
        optim.zero_grad();
        assert_eq!(w.grad().unwrap(), vec![vec![0.0; 2]; 2]);
        assert_eq!(optim.params().len(), 4);
    }

    #[test]
    fn test_sgd_validates_configuration() {
        let (_, params) = params_with_grad();
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Sgd::new(params.clone(), lr),
                Err(GridGradError::ConfigurationError(_))
            ));
        }
        let frozen = Scalar::new(1.0, DType::F64, false).unwrap();
        assert!(Sgd::new(vec![frozen], 0.1).is_err());
    }
}
