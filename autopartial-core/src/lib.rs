#![warn(missing_debug_implementations)]

//! Placeholders and arguments for automatic partial application.
//!
//! A call is described by [`Args`],
//! positional and keyword arguments,
//! any of which may be a [`Placeholder`].
//! Once a later call supplies values,
//! its arguments become [`Bindings`],
//! and each placeholder resolves to the value
//! at its position
//! or under its keyword.
//!
//! # Examples
//!
//! ```
//! use autopartial_core::{args, kw, P0};
//!
//! let pending = args![P0, 2; a = kw("q")];
//! let bindings = args![3; q = 4].into_concrete().unwrap().into_bindings();
//! let vals = pending.resolve(&bindings).unwrap();
//! assert_eq!(vals.positional::<i32>(0), Ok(&3));
//! assert_eq!(vals.positional::<i32>(1), Ok(&2));
//! assert_eq!(vals.keyword::<i32>("a"), Ok(&4));
//! ```

mod args;
mod argvals;
mod bindings;
mod keys;
mod placeholder;
mod value;

pub use crate::{args::*, argvals::*, bindings::*, keys::*, placeholder::*, value::*};
