//! Resolved dependencies handed to a construction function

use crate::{AnyValue, error::Error};
use indexmap::IndexMap;
use std::{
    any::type_name,
    fmt::{Debug, Formatter},
    sync::Arc
};

/// Insertion-ordered map of dependency names to their resolved values
///
/// Keys and order match the [`Dependencies`](crate::Dependencies) of the declaration
/// being constructed. Nested declarations are replaced with their resolved values,
/// plain values are passed through as-is.
#[derive(Clone, Default)]
pub struct Resolved {
    values: IndexMap<String, AnyValue>
}

impl Debug for Resolved {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Resolved {
    /// Creates an empty map, useful to call
    /// [`Declaration::construct`](crate::Declaration::construct) by hand
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under `name`
    #[inline]
    pub fn with<T: Send + Sync + 'static>(self, name: impl Into<String>, value: T) -> Self {
        self.with_shared(name, Arc::new(value))
    }

    /// Adds an already shared value under `name`
    #[inline]
    pub fn with_shared<T: Send + Sync + 'static>(mut self, name: impl Into<String>, value: Arc<T>) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns a shared pointer to the value resolved under `name`
    ///
    /// The pointer is the same one held by the store (for declarations)
    /// or by the [`Dependencies`](crate::Dependencies) (for plain values).
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, Error> {
        let value = self.values
            .get(name)
            .ok_or_else(|| Error::MissingDependency(name.into()))?;
        value
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch { name: name.into(), expected: type_name::<T>() })
    }

    /// Returns a clone of the value resolved under `name`.
    /// `T` must implement [`Clone`] otherwise use [`get`](Self::get)
    /// that returns a shared pointer.
    #[inline]
    pub fn cloned<T: Send + Sync + Clone + 'static>(&self, name: &str) -> Result<T, Error> {
        self.get::<T>(name).map(|value| value.as_ref().clone())
    }

    /// Returns `true` if a value is present under `name`
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of resolved values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no resolved values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over names in declaration order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl FromIterator<(String, AnyValue)> for Resolved {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (String, AnyValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
