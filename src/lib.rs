#![warn(missing_debug_implementations)]

//! Automatic partial application
//! with positional and named placeholders.
//!
//! A wrapped function
//! called with no placeholders
//! runs as usual.
//! Called with any placeholder,
//! it returns a new function instead.
//! That function fills each placeholder
//! from its own arguments,
//! by position for [`P0`] through [`P9`] and [`pos`],
//! or by keyword for [`kw`],
//! then calls the original.
//! Deferred functions can themselves
//! be called with placeholders,
//! so arguments can be reordered and renamed
//! over any number of rounds.
//!
//! # Examples
//!
//! ```
//! use autopartial::{prelude::*, GetErr};
//!
//! let power = wrap_named("power", |args: ArgVals| -> Result<i32, GetErr> {
//!     let base = args.positional::<i32>(0)?;
//!     let exponent = args.positional::<i32>(1)?;
//!     Ok(base.pow(*exponent as u32))
//! });
//! assert_eq!(power.call(args![3, 2]).unwrap().done(), Some(Ok(9)));
//!
//! let square = power.call(args![P0, 2]).unwrap().partial().unwrap();
//! assert_eq!(square.call(args![3]).unwrap().done(), Some(Ok(9)));
//!
//! // Keyword arguments can be played with too.
//! let verbose_power = power
//!     .call(args![kw("base"), kw("exponent")])
//!     .unwrap()
//!     .partial()
//!     .unwrap();
//! assert_eq!(
//!     verbose_power
//!         .call(args![; base = 3, exponent = 2])
//!         .unwrap()
//!         .done(),
//!     Some(Ok(9))
//! );
//!
//! // Also in the opposite direction.
//! let power_again = verbose_power
//!     .call(args![; base = P0, exponent = P1])
//!     .unwrap()
//!     .partial()
//!     .unwrap();
//! assert_eq!(power_again.call(args![3, 2]).unwrap().done(), Some(Ok(9)));
//! ```

mod binder;
pub mod prelude;

pub use autopartial_core::{
    args, kw, pos, AnyArg, ArgVals, Args, Argument, BindError, Bindings, GetErr, Key, Keys, Name,
    Placeholder, P0, P1, P2, P3, P4, P5, P6, P7, P8, P9,
};

pub use crate::binder::*;
