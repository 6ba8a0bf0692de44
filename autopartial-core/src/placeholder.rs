use core::fmt;

use paste::paste;

use crate::{AnyArg, BindError, Bindings, Key, Name};

/// A marker standing in for an argument
/// to be supplied by a later call.
///
/// A positional placeholder takes the value
/// at its index in the later call.
/// A named placeholder takes the value
/// of its keyword in the later call.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    key: Key,
}

impl Placeholder {
    pub const fn position(index: usize) -> Self {
        Placeholder {
            key: Key::Position(index),
        }
    }

    pub fn named(name: impl Into<Name>) -> Self {
        Placeholder {
            key: Key::Name(name.into()),
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Return a fresh copy of the value bound to this placeholder.
    pub fn resolve(&self, bindings: &Bindings) -> Result<Box<dyn AnyArg>, BindError> {
        bindings.get(&self.key).map(|value| value.boxed_clone())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.key)
    }
}

macro_rules! positional_placeholders {
    ( $( $i:literal ),* ) => {
        paste! {
            $(
                #[doc = "Placeholder for positional argument " $i " of the next call."]
                pub const [<P $i>]: Placeholder = Placeholder::position($i);
            )*
        }
    };
}

positional_placeholders!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);

/// Return a placeholder for positional argument `index` of the next call.
pub const fn pos(index: usize) -> Placeholder {
    Placeholder::position(index)
}

/// Return a placeholder for keyword argument `name` of the next call.
pub fn kw(name: impl Into<Name>) -> Placeholder {
    Placeholder::named(name)
}
