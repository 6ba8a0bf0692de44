use std::collections::BTreeMap;

use crate::{AnyArg, ArgVals, Key, Keys};

/// Values supplied by one call,
/// keyed by position and by keyword,
/// for placeholders to look up.
#[derive(Clone, Debug, Default)]
pub struct Bindings(BTreeMap<Key, Box<dyn AnyArg>>);

impl Bindings {
    pub fn new() -> Self {
        Bindings(BTreeMap::new())
    }

    pub fn insert(&mut self, key: Key, value: Box<dyn AnyArg>) -> Option<Box<dyn AnyArg>> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &Key) -> Result<&dyn AnyArg, BindError> {
        self.0
            .get(key)
            .map(|value| &**value)
            .ok_or_else(|| BindError::Missing(key.clone()))
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> Keys {
        self.0.keys().cloned().collect()
    }
}

impl FromIterator<(Key, Box<dyn AnyArg>)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Key, Box<dyn AnyArg>)>>(iter: I) -> Self {
        Bindings(iter.into_iter().collect())
    }
}

impl From<ArgVals> for Bindings {
    fn from(vals: ArgVals) -> Self {
        let (positional, keyword) = vals.into_parts();
        positional
            .into_iter()
            .enumerate()
            .map(|(i, value)| (Key::Position(i), value))
            .chain(keyword.into_iter().map(|(name, value)| (Key::Name(name), value)))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("No binding for placeholder `{{{0}}}`.")]
    Missing(Key),
}
