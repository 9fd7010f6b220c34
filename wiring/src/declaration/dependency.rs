//! Named dependencies of a declaration

use super::{Constructable, Declaration, DeclarationId};
use crate::AnyValue;
use indexmap::IndexMap;
use std::{
    fmt::{Debug, Formatter},
    sync::Arc
};

/// A type-erased handle to a [`Declaration`] of any value type
#[derive(Clone)]
pub struct ErasedDeclaration(Arc<dyn Constructable>);

impl ErasedDeclaration {
    #[inline]
    pub(crate) fn new(inner: Arc<dyn Constructable>) -> Self {
        Self(inner)
    }

    /// Returns the identity of the underlying declaration
    #[inline]
    pub fn id(&self) -> DeclarationId {
        self.0.id()
    }

    /// Returns the name of the type the underlying declaration produces
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    #[inline]
    pub(crate) fn as_constructable(&self) -> &dyn Constructable {
        self.0.as_ref()
    }
}

impl Debug for ErasedDeclaration {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Declaration({} {})", self.id(), self.type_name())
    }
}

/// A single dependency entry: either another declaration or a plain value
#[derive(Clone)]
pub enum Dependency {
    /// A nested declaration, resolved recursively through the same store
    Declaration(ErasedDeclaration),
    /// A plain value, passed to the construction function unchanged
    Value(AnyValue),
}

impl Dependency {
    /// Wraps a plain value
    #[inline]
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Value(Arc::new(value))
    }

    /// Wraps an already shared plain value without re-allocating it
    #[inline]
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::Value(value)
    }

    /// Returns `true` if this entry is a nested declaration
    #[inline]
    pub fn is_declaration(&self) -> bool {
        matches!(self, Dependency::Declaration(_))
    }
}

impl Debug for Dependency {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::Declaration(decl) => Debug::fmt(decl, f),
            Dependency::Value(_) => f.write_str("Value(..)"),
        }
    }
}

impl<T: Send + Sync + 'static> From<&Declaration<T>> for Dependency {
    #[inline]
    fn from(decl: &Declaration<T>) -> Self {
        Self::Declaration(decl.erased())
    }
}

impl<T: Send + Sync + 'static> From<Declaration<T>> for Dependency {
    #[inline]
    fn from(decl: Declaration<T>) -> Self {
        Self::Declaration(decl.erased())
    }
}

impl From<ErasedDeclaration> for Dependency {
    #[inline]
    fn from(decl: ErasedDeclaration) -> Self {
        Self::Declaration(decl)
    }
}

/// Insertion-ordered map of dependency names to [`Dependency`] entries
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    entries: IndexMap<String, Dependency>
}

impl Dependencies {
    /// Creates an empty dependency map
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dependency under `name`
    ///
    /// Re-using a name replaces the previous entry in place.
    #[inline]
    pub fn with(mut self, name: impl Into<String>, dependency: impl Into<Dependency>) -> Self {
        self.entries.insert(name.into(), dependency.into());
        self
    }

    /// Adds a plain value under `name`
    #[inline]
    pub fn with_value<T: Send + Sync + 'static>(self, name: impl Into<String>, value: T) -> Self {
        self.with(name, Dependency::value(value))
    }

    /// Returns the entry declared under `name`
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.get(name)
    }

    /// Returns the number of declared dependencies
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is declared
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over dependency names in declaration order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in declaration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.entries.iter().map(|(name, dep)| (name.as_str(), dep))
    }
}
