pub(crate) mod exp;
pub(crate) mod ln;
pub(crate) mod trig;

pub(crate) use exp::exp_op;
pub(crate) use ln::ln_op;
pub(crate) use trig::{cos_op, sin_op};
