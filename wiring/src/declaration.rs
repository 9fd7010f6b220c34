//! Declarations: recipes pairing named dependencies with a construction function

use crate::{AnyValue, Resolved, error::Error};
use std::{
    any::type_name,
    fmt::{Debug, Display, Formatter},
    sync::{Arc, atomic::{AtomicU64, Ordering}}
};

pub use self::dependency::{Dependencies, Dependency, ErasedDeclaration};

pub mod dependency;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Declaration`]
///
/// Assigned once when the declaration is built and shared by all of its clones.
/// Two declarations with identical contents still have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationId(u64);

impl DeclarationId {
    #[inline]
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value of this id
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for DeclarationId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type ConstructFn<T> = Box<
    dyn Fn(&Resolved) -> Result<T, Error>
    + Send
    + Sync
>;

struct Inner<T> {
    id: DeclarationId,
    dependencies: Dependencies,
    construct: ConstructFn<T>,
}

/// An immutable recipe for a value of type `T`
///
/// A declaration owns a map of named [`Dependencies`] and a construction function
/// that receives those dependencies already resolved. Nothing is constructed when
/// a declaration is built; values are produced lazily by [`resolve`](crate::resolve)
/// and cached per [`Store`](crate::Store).
///
/// Cloning a declaration is cheap and yields the *same* declaration.
///
/// # Example
/// ```
/// use wiring::{Declaration, Dependencies, Store};
///
/// let base = Declaration::new(Dependencies::new(), |_| Ok(40));
/// let answer = Declaration::new(
///     Dependencies::new()
///         .with("base", &base)
///         .with_value("offset", 2),
///     |deps| Ok(*deps.get::<i32>("base")? + *deps.get::<i32>("offset")?)
/// );
///
/// let store = Store::new();
/// assert_eq!(*store.resolve(&answer).unwrap(), 42);
/// ```
pub struct Declaration<T> {
    inner: Arc<Inner<T>>
}

impl<T> Clone for Declaration<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T> Debug for Declaration<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Declaration")
            .field("id", &self.inner.id)
            .field("type", &type_name::<T>())
            .field("dependencies", &self.inner.dependencies.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Declaration<T> {
    /// Builds a new declaration from its dependencies and a construction function
    #[inline]
    pub fn new<F>(dependencies: Dependencies, construct: F) -> Self
    where
        F: Fn(&Resolved) -> Result<T, Error> + Send + Sync + 'static
    {
        let inner = Inner {
            id: DeclarationId::next(),
            dependencies,
            construct: Box::new(construct),
        };
        Self { inner: Arc::new(inner) }
    }

    /// Invokes the construction function directly with the given dependencies,
    /// bypassing every store
    #[inline]
    pub fn construct(&self, resolved: &Resolved) -> Result<T, Error> {
        (self.inner.construct)(resolved)
    }

    #[inline]
    pub(crate) fn erased(&self) -> ErasedDeclaration {
        ErasedDeclaration::new(self.inner.clone())
    }

    #[inline]
    pub(crate) fn as_constructable(&self) -> &dyn Constructable {
        self.inner.as_ref()
    }
}

impl<T> Declaration<T> {
    /// Returns the identity of this declaration
    #[inline]
    pub fn id(&self) -> DeclarationId {
        self.inner.id
    }

    /// Returns the declared dependencies
    #[inline]
    pub fn dependencies(&self) -> &Dependencies {
        &self.inner.dependencies
    }
}

/// Type-erased view of a declaration used by the resolver
pub(crate) trait Constructable: Send + Sync {
    fn id(&self) -> DeclarationId;
    fn type_name(&self) -> &'static str;
    fn dependencies(&self) -> &Dependencies;
    fn construct_erased(&self, resolved: &Resolved) -> Result<AnyValue, Error>;
}

impl<T: Send + Sync + 'static> Constructable for Inner<T> {
    #[inline]
    fn id(&self) -> DeclarationId {
        self.id
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    #[inline]
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    #[inline]
    fn construct_erased(&self, resolved: &Resolved) -> Result<AnyValue, Error> {
        (self.construct)(resolved).map(|value| Arc::new(value) as AnyValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn it_constructs_directly() {
        let app = Declaration::new(
            Dependencies::new()
                .with_value("dep1", 1)
                .with_value("dep2", "dep2"),
            |deps| Ok((deps.cloned::<i32>("dep1")?, deps.cloned::<&str>("dep2")?))
        );

        let resolved = Resolved::new()
            .with("dep1", 2)
            .with("dep2", "dep");

        assert_eq!(app.construct(&resolved).unwrap(), (2, "dep"));
    }

    #[test]
    fn it_does_not_construct_when_built() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let _ = Declaration::new(Dependencies::new(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn identical_declarations_have_distinct_ids() {
        let a = Declaration::new(Dependencies::new(), |_| Ok(1));
        let b = Declaration::new(Dependencies::new(), |_| Ok(1));

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clones_share_id() {
        let a = Declaration::new(Dependencies::new(), |_| Ok(1));
        let b = a.clone();

        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn it_keeps_dependency_names() {
        let leaf = Declaration::new(Dependencies::new(), |_| Ok(1));
        let root = Declaration::new(
            Dependencies::new()
                .with("leaf", &leaf)
                .with_value("plain", 2),
            |_| Ok(())
        );

        let names = root.dependencies().names().collect::<Vec<_>>();

        assert_eq!(names, ["leaf", "plain"]);
    }

    #[test]
    fn it_formats_debug() {
        let leaf = Declaration::new(Dependencies::new(), |_| Ok(1u8));
        let debug = format!("{leaf:?}");

        assert!(debug.contains("Declaration"));
        assert!(debug.contains("u8"));
    }

    #[test]
    fn it_displays_id() {
        let leaf = Declaration::new(Dependencies::new(), |_| Ok(1));

        assert_eq!(leaf.id().to_string(), format!("#{}", leaf.id().as_u64()));
    }
}
