//! Value store: a cache of resolved values keyed by declaration identity

use crate::{AnyValue, Declaration, DeclarationId, error::Error};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    hash::{BuildHasherDefault, Hasher},
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard}
};

static GLOBAL: OnceLock<Store> = OnceLock::new();

/// Inner HashMap of resolved values
type ValueMap = HashMap<
    DeclarationId,
    AnyValue,
    BuildHasherDefault<IdHasher>
>;

#[derive(Default)]
struct IdHasher(u64);

impl Hasher for IdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[cold]
    fn write(&mut self, _: &[u8]) {
        unreachable!("DeclarationId calls write_u64");
    }

    #[inline]
    fn write_u64(&mut self, id: u64) {
        self.0 = id;
    }
}

/// Represents a value store, that caches resolved declarations
/// and lets callers override any of them.
///
/// A `Store` is a handle: clones share the same table. Stores created with
/// [`Store::new`] are independent from each other and from [`Store::global`].
/// Entries are never evicted.
///
/// # Example
/// ```
/// use wiring::{Declaration, Dependencies, Store};
///
/// let port = Declaration::new(Dependencies::new(), |_| Ok(8080u16));
///
/// let store = Store::new();
/// store.set(&port, 7878);
///
/// assert_eq!(*store.resolve(&port).unwrap(), 7878);
/// ```
#[derive(Clone, Default)]
pub struct Store {
    values: Arc<RwLock<ValueMap>>
}

impl Debug for Store {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("len", &self.len())
            .finish()
    }
}

impl Store {
    /// Creates a new, empty store
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide default store
    ///
    /// It is created on first access, shared by every call to [`resolve`](crate::resolve)
    /// and lives until the process exits. It is never reset.
    #[inline]
    pub fn global() -> &'static Store {
        GLOBAL.get_or_init(Store::new)
    }

    /// Returns the cached value of `decl`, if any
    #[inline]
    pub fn get<T: Send + Sync + 'static>(&self, decl: &Declaration<T>) -> Option<Arc<T>> {
        self.get_erased(decl.id())
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Sets or overrides the value of `decl` in this store.
    /// Returns the store itself, so several overrides can be chained.
    #[inline]
    pub fn set<T: Send + Sync + 'static>(&self, decl: &Declaration<T>, value: T) -> &Self {
        self.set_shared(decl, Arc::new(value))
    }

    /// Sets or overrides the value of `decl` with an already shared pointer
    pub fn set_shared<T: Send + Sync + 'static>(&self, decl: &Declaration<T>, value: Arc<T>) -> &Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(declaration = %decl.id(), "value set");

        self.write().insert(decl.id(), value);
        self
    }

    /// Consumes the store, sets the value of `decl` and returns the store
    ///
    /// # Example
    /// ```
    /// use wiring::{Declaration, Dependencies, Store};
    ///
    /// let host = Declaration::new(Dependencies::new(), |_| Ok("localhost"));
    /// let port = Declaration::new(Dependencies::new(), |_| Ok(8080u16));
    ///
    /// let store = Store::new()
    ///     .with(&host, "127.0.0.1")
    ///     .with(&port, 7878);
    ///
    /// assert_eq!(store.len(), 2);
    /// ```
    #[inline]
    pub fn with<T: Send + Sync + 'static>(self, decl: &Declaration<T>, value: T) -> Self {
        self.set(decl, value);
        self
    }

    /// Returns `true` if a value for `decl` is cached or overridden
    #[inline]
    pub fn contains<T>(&self, decl: &Declaration<T>) -> bool {
        self.read().contains_key(&decl.id())
    }

    /// Returns the number of cached values
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is cached
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Resolves `decl` through this store and returns a shared pointer to its value
    #[inline]
    pub fn resolve<T: Send + Sync + 'static>(&self, decl: &Declaration<T>) -> Result<Arc<T>, Error> {
        crate::resolve::resolve_in(decl, self)
    }

    #[inline]
    pub(crate) fn get_erased(&self, id: DeclarationId) -> Option<AnyValue> {
        self.read().get(&id).cloned()
    }

    /// Caches `value` unless another value was stored in the meantime,
    /// returns whichever value ends up in the store.
    #[inline]
    pub(crate) fn insert_if_absent(&self, id: DeclarationId, value: AnyValue) -> AnyValue {
        self.write()
            .entry(id)
            .or_insert(value)
            .clone()
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, ValueMap> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, ValueMap> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
