use core::fmt;
use std::collections::BTreeMap;

use crate::{AnyArg, ArgVals, BindError, Bindings, Keys, Name, Placeholder};

/// One argument of a call,
/// either a concrete value
/// or a placeholder for a value
/// to be supplied later.
#[derive(Clone, Debug)]
pub enum Argument {
    Concrete(Box<dyn AnyArg>),
    Placeholder(Placeholder),
}

impl Argument {
    /// Return `value` as an argument,
    /// classified by its dynamic type.
    pub fn new<T>(value: T) -> Self
    where
        T: AnyArg,
    {
        Self::from_boxed(Box::new(value))
    }

    pub fn from_boxed(value: Box<dyn AnyArg>) -> Self {
        // A boxed value passed through `new`
        // is boxed twice.
        match value.downcast::<Box<dyn AnyArg>>() {
            Ok(inner) => Self::from_boxed(*inner),
            Err(value) => match value.downcast::<Placeholder>() {
                Ok(placeholder) => Argument::Placeholder(*placeholder),
                Err(value) => Argument::Concrete(value),
            },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Argument::Placeholder(_))
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Argument::Concrete(_) => None,
            Argument::Placeholder(placeholder) => Some(placeholder),
        }
    }

    pub fn into_concrete(self) -> Option<Box<dyn AnyArg>> {
        match self {
            Argument::Concrete(value) => Some(value),
            Argument::Placeholder(_) => None,
        }
    }

    /// Return a fresh concrete value for this argument,
    /// looking up placeholders in `bindings`.
    pub fn resolve(&self, bindings: &Bindings) -> Result<Box<dyn AnyArg>, BindError> {
        match self {
            Argument::Concrete(value) => Ok(value.clone()),
            Argument::Placeholder(placeholder) => placeholder.resolve(bindings),
        }
    }
}

impl From<Placeholder> for Argument {
    fn from(placeholder: Placeholder) -> Self {
        Argument::Placeholder(placeholder)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Concrete(value) => write!(f, "{value:?}"),
            Argument::Placeholder(placeholder) => write!(f, "{placeholder}"),
        }
    }
}

/// Arguments of one call,
/// any of which may be placeholders.
#[derive(Clone, Debug, Default)]
pub struct Args {
    positional: Vec<Argument>,
    keyword: BTreeMap<Name, Argument>,
}

/// Build [`Args`].
///
/// Positional arguments come first,
/// followed by a `;`
/// and keyword arguments.
///
/// ```
/// use autopartial_core::{args, P0};
///
/// let args = args![1, P0; a = P0, b = 4];
/// assert_eq!(args.to_string(), "1, {0}, a = {0}, b = 4");
/// ```
#[macro_export]
macro_rules! args {
    ( $( $arg:expr ),* ; $( $name:ident = $kwarg:expr ),* $(,)? ) => {
        $crate::Args::new()
            $( .arg($arg) )*
            $( .kwarg(stringify!($name), $kwarg) )*
    };
    ( $( $arg:expr ),* $(,)? ) => {
        $crate::Args::new() $( .arg($arg) )*
    };
}

impl Args {
    pub fn new() -> Self {
        Args {
            positional: Vec::new(),
            keyword: BTreeMap::new(),
        }
    }

    pub fn arg<T>(mut self, value: T) -> Self
    where
        T: AnyArg,
    {
        self.push(Argument::new(value));
        self
    }

    pub fn kwarg<T>(mut self, name: impl Into<Name>, value: T) -> Self
    where
        T: AnyArg,
    {
        self.insert(name, Argument::new(value));
        self
    }

    pub fn push(&mut self, argument: Argument) {
        self.positional.push(argument);
    }

    /// Set keyword argument `name`,
    /// returning the argument it replaced.
    pub fn insert(&mut self, name: impl Into<Name>, argument: Argument) -> Option<Argument> {
        self.keyword.insert(name.into(), argument)
    }

    pub fn positional(&self) -> &[Argument] {
        &self.positional
    }

    pub fn keyword(&self) -> &BTreeMap<Name, Argument> {
        &self.keyword
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    pub fn has_placeholders(&self) -> bool {
        self.positional.iter().any(Argument::is_placeholder)
            || self.keyword.values().any(Argument::is_placeholder)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> + '_ {
        self.positional
            .iter()
            .chain(self.keyword.values())
            .filter_map(Argument::as_placeholder)
    }

    /// Return keys a later call must bind.
    pub fn required_keys(&self) -> Keys {
        self.placeholders().map(|x| x.key().clone()).collect()
    }

    /// Return these arguments as values
    /// if none are placeholders.
    pub fn into_concrete(self) -> Result<ArgVals, Self> {
        if self.has_placeholders() {
            return Err(self);
        }
        Ok(ArgVals::from_parts(
            self.positional
                .into_iter()
                .filter_map(Argument::into_concrete)
                .collect(),
            self.keyword
                .into_iter()
                .filter_map(|(name, arg)| arg.into_concrete().map(|value| (name, value)))
                .collect(),
        ))
    }

    /// Return values for these arguments,
    /// with each placeholder replaced by its value in `bindings`.
    ///
    /// Keyword names are kept.
    pub fn resolve(&self, bindings: &Bindings) -> Result<ArgVals, BindError> {
        Ok(ArgVals::from_parts(
            self.positional
                .iter()
                .map(|arg| arg.resolve(bindings))
                .collect::<Result<_, _>>()?,
            self.keyword
                .iter()
                .map(|(name, arg)| arg.resolve(bindings).map(|value| (name.clone(), value)))
                .collect::<Result<_, _>>()?,
        ))
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arg in self.positional.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{arg}")?;
        }
        for (name, arg) in self.keyword.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{name} = {arg}")?;
        }
        Ok(())
    }
}
