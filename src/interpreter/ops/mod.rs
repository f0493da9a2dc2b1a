//! Operator evaluation, split by arity.

pub(crate) mod binary;
pub(crate) mod unary;
