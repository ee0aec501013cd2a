// src/nn/mod.rs
// Layers, containers and losses built from engine operators.

pub mod layers;
pub mod losses;
pub mod module;
pub mod sequential;

pub use layers::{Linear, ReLU};
pub use losses::{MSELoss, Reduction};
pub use module::Module;
pub use sequential::Sequential;
