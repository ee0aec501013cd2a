// gridgrad-optim/src/adam.rs

use gridgrad_core::{GridGradError, Scalar};

use crate::{check_params, warn_if_no_grad, Optimizer};

/// Hyperparameters for [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamOptions {
    /// Learning rate.
    pub lr: f64,
    /// Decay rates of the first and second moment estimates.
    pub betas: (f64, f64),
    /// Term added to the denominator for numerical stability.
    pub eps: f64,
}

impl Default for AdamOptions {
    fn default() -> Self {
        AdamOptions {
            lr: 0.001,
            betas: (0.9, 0.999),
            eps: 1e-8,
        }
    }
}

impl AdamOptions {
    pub fn with_lr(lr: f64) -> Self {
        AdamOptions {
            lr,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), GridGradError> {
        if !(self.lr.is_finite() && self.lr > 0.0) {
            return Err(GridGradError::ConfigurationError(format!(
                "Invalid learning rate: {}",
                self.lr
            )));
        }
        let (beta1, beta2) = self.betas;
        if !(0.0..1.0).contains(&beta1) || !(0.0..1.0).contains(&beta2) {
            return Err(GridGradError::ConfigurationError(format!(
                "Invalid betas: ({}, {}), both must be in [0, 1)",
                beta1, beta2
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(GridGradError::ConfigurationError(format!(
                "Invalid epsilon: {}",
                self.eps
            )));
        }
        Ok(())
    }
}

/// Implements the Adam optimization algorithm.
/// Reference: https://arxiv.org/abs/1412.6980
///
/// Keeps one first and one second moment estimate per parameter, indexed
/// like `params`.
#[derive(Debug)]
pub struct Adam {
    params: Vec<Scalar>,
    options: AdamOptions,
    t: u64,
    m: Vec<f64>,
    v: Vec<f64>,
}

impl Adam {
    pub fn new(params: Vec<Scalar>, options: AdamOptions) -> Result<Self, GridGradError> {
        options.validate()?;
        check_params(&params)?;
        let n = params.len();
        Ok(Adam {
            params,
            options,
            t: 0,
            m: vec![0.0; n],
            v: vec![0.0; n],
        })
    }

    pub fn options(&self) -> &AdamOptions {
        &self.options
    }

    /// Number of steps taken so far.
    pub fn step_count(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self) -> Result<(), GridGradError> {
        warn_if_no_grad("Adam", &self.params);
        self.t += 1;
        let AdamOptions { lr, betas, eps } = self.options;
        let (beta1, beta2) = betas;
        let t = i32::try_from(self.t).unwrap_or(i32::MAX);
        let bias_correction1 = 1.0 - beta1.powi(t);
        let bias_correction2 = 1.0 - beta2.powi(t);

        for (i, param) in self.params.iter().enumerate() {
            let grad = param.grad();
            self.m[i] = beta1 * self.m[i] + (1.0 - beta1) * grad;
            self.v[i] = beta2 * self.v[i] + (1.0 - beta2) * grad * grad;

            let m_hat = self.m[i] / bias_correction1;
            let v_hat = self.v[i] / bias_correction2;
            param.set_data(param.data() - lr * m_hat / (v_hat.sqrt() + eps))?;
        }
        Ok(())
    }

    fn params(&self) -> &[Scalar] {
        &self.params
    }
}
