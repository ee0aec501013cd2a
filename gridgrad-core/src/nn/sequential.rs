use crate::error::GridGradError;
use crate::matrix::Matrix;
use crate::nn::module::Module;
use crate::scalar::Scalar;

/// Runs its modules one after the other, feeding each output to the next.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends a module; returns `self` for chaining.
    pub fn add<M: Module + 'static>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    /// An empty container returns its input unchanged.
    fn forward(&self, input: &Matrix) -> Result<Matrix, GridGradError> {
        let mut output = input.clone();
        for module in &self.modules {
            output = module.forward(&output)?;
        }
        Ok(output)
    }

    fn parameters(&self) -> Vec<Scalar> {
        self.modules
            .iter()
            .flat_map(|module| module.parameters())
            .collect()
    }
}
