//! Functions, placeholders, and types for wildcard import.

pub use crate::{
    args, kw, pos, wrap, wrap_named, ArgVals, Args, AutoPartial, Called, P0, P1, P2, P3, P4, P5,
    P6, P7, P8, P9,
};
