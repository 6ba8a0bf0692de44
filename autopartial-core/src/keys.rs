use core::fmt;
use std::{borrow::Cow, collections::BTreeSet};

/// Name of a keyword argument.
pub type Name = Cow<'static, str>;

/// Where a value sits in a call:
/// at a position
/// or under a keyword.
///
/// Positions and names never compare equal,
/// so both can share one map.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Position(usize),
    Name(Name),
}

impl Key {
    pub fn name(name: impl Into<Name>) -> Self {
        Key::Name(name.into())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Position(index)
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Key::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Cow::Owned(name))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Position(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keys(BTreeSet<Key>);

#[macro_export]
macro_rules! keys {
    ( ) => {
        $crate::Keys::new()
    };
    ( $key:expr ) => {
        $crate::Keys::singleton($key)
    };
    ( $key:expr, $( $rest:expr ),* ) => {
        $crate::Keys::singleton($key).union($crate::keys![$( $rest ),*])
    };
}

impl Keys {
    pub fn new() -> Self {
        Keys(BTreeSet::new())
    }

    pub fn singleton(key: impl Into<Key>) -> Self {
        Keys(std::iter::once(key.into()).collect())
    }

    pub fn union(mut self, mut other: Self) -> Self {
        self.0.append(&mut other.0);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> + '_ {
        self.0.iter()
    }
}

impl FromIterator<Key> for Keys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Keys(iter.into_iter().collect())
    }
}
