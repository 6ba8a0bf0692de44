use std::{any::type_name, collections::BTreeMap};

use crate::{AnyArg, Bindings, Key, Name};

/// Concrete arguments of one call,
/// as received by a wrapped function.
#[derive(Clone, Debug, Default)]
pub struct ArgVals {
    positional: Vec<Box<dyn AnyArg>>,
    keyword: BTreeMap<Name, Box<dyn AnyArg>>,
}

impl ArgVals {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), BTreeMap::new())
    }

    pub fn from_parts(
        positional: Vec<Box<dyn AnyArg>>,
        keyword: BTreeMap<Name, Box<dyn AnyArg>>,
    ) -> Self {
        ArgVals {
            positional,
            keyword,
        }
    }

    pub fn into_parts(self) -> (Vec<Box<dyn AnyArg>>, BTreeMap<Name, Box<dyn AnyArg>>) {
        (self.positional, self.keyword)
    }

    pub fn len_positional(&self) -> usize {
        self.positional.len()
    }

    pub fn len_keyword(&self) -> usize {
        self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Return the given argument
    /// if it is present
    /// and has the right type.
    pub fn get<T>(&self, key: &Key) -> Result<&T, GetErr>
    where
        T: AnyArg,
    {
        let value = match key {
            Key::Position(index) => self.positional.get(*index),
            Key::Name(name) => self.keyword.get(name),
        }
        .ok_or_else(|| GetErr::Missing(key.clone()))?;
        value.downcast_ref::<T>().ok_or_else(|| GetErr::WrongType {
            key: key.clone(),
            ty: type_name::<T>(),
        })
    }

    pub fn positional<T>(&self, index: usize) -> Result<&T, GetErr>
    where
        T: AnyArg,
    {
        self.get(&Key::Position(index))
    }

    pub fn keyword<T>(&self, name: &str) -> Result<&T, GetErr>
    where
        T: AnyArg,
    {
        self.get(&Key::name(name.to_owned()))
    }

    pub fn iter_positional(&self) -> impl Iterator<Item = &dyn AnyArg> + '_ {
        self.positional.iter().map(|value| &**value)
    }

    pub fn iter_keyword(&self) -> impl Iterator<Item = (&str, &dyn AnyArg)> + '_ {
        self.keyword
            .iter()
            .map(|(name, value)| (&**name, &**value))
    }

    /// Return all arguments as `T`
    /// if every argument has type `T`.
    pub fn into_typed<T>(self) -> Result<(Vec<T>, BTreeMap<Name, T>), GetErr>
    where
        T: AnyArg,
    {
        let positional = self
            .positional
            .into_iter()
            .enumerate()
            .map(|(i, value)| downcast_owned(Key::Position(i), value))
            .collect::<Result<_, _>>()?;
        let keyword = self
            .keyword
            .into_iter()
            .map(|(name, value)| {
                downcast_owned(Key::Name(name.clone()), value).map(|value| (name, value))
            })
            .collect::<Result<_, _>>()?;
        Ok((positional, keyword))
    }

    /// Return a map from each position and keyword to its value,
    /// for placeholders to look up.
    pub fn into_bindings(self) -> Bindings {
        Bindings::from(self)
    }
}

fn downcast_owned<T>(key: Key, value: Box<dyn AnyArg>) -> Result<T, GetErr>
where
    T: AnyArg,
{
    value
        .downcast()
        .map(|x: Box<T>| *x)
        .map_err(|_| GetErr::WrongType {
            key,
            ty: type_name::<T>(),
        })
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GetErr {
    #[error("Argument `{0}` is missing.")]
    Missing(Key),
    #[error("Expected type `{ty}` for argument `{key}`.")]
    WrongType { key: Key, ty: &'static str },
}
