pub(crate) mod mean;

pub(crate) use mean::mean_op;
