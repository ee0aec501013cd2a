pub(crate) mod relu;

pub(crate) use relu::relu_op;
