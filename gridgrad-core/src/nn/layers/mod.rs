// src/nn/layers/mod.rs

pub mod linear;
pub mod relu;

pub use linear::Linear;
pub use relu::ReLU;
