// src/ops/arithmetic/mod.rs

pub(crate) mod add;
pub(crate) mod mul;
pub(crate) mod pow;

pub(crate) use add::{add_constant_op, add_op};
pub(crate) use mul::{multiply_op, scale_op};
pub(crate) use pow::pow_op;
