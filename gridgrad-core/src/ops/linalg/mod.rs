pub(crate) mod matmul;

pub(crate) use matmul::matmul_op;
