//! gridgrad: reverse-mode automatic differentiation over scalars and small
//! dense matrices, with a thin neural-network layer on top.
//!
//! Values record the operator that produced them as they are computed.
//! Calling `backward()` on a result walks that record in reverse and
//! accumulates `d result / d x` into every value `x` that requires grad.

pub mod autograd;
pub mod error;
pub mod matrix;
pub mod nn;
pub(crate) mod ops;
pub mod scalar;
pub(crate) mod scalar_data;
pub mod types;
pub mod utils;

pub use autograd::OpKind;
pub use error::GridGradError;
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use types::DType;
// Re-export traits required by public functions
pub use num_traits;
