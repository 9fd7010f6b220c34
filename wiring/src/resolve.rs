//! Resolution of declarations into values

use crate::{
    AnyValue, Declaration, Dependency, Resolved, Store,
    declaration::Constructable,
    error::Error
};
use std::{any::type_name, sync::Arc};

/// Resolves `decl` through the process-wide default store
///
/// Returns the cached value if there is one, otherwise constructs it
/// (resolving nested declarations first) and caches it.
/// Calling it twice returns the same shared pointer.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use wiring::{Declaration, Dependencies, resolve};
///
/// let greeting = Declaration::new(Dependencies::new(), |_| Ok(String::from("hello")));
///
/// let a = resolve(&greeting).unwrap();
/// let b = resolve(&greeting).unwrap();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[inline]
pub fn resolve<T: Send + Sync + 'static>(decl: &Declaration<T>) -> Result<Arc<T>, Error> {
    resolve_in(decl, Store::global())
}

/// Resolves `decl` through the given `store`
///
/// Values already present in `store`, including overrides set with
/// [`Store::set`], are used as-is for `decl` and for any nested declaration.
pub fn resolve_in<T: Send + Sync + 'static>(decl: &Declaration<T>, store: &Store) -> Result<Arc<T>, Error> {
    resolve_erased(decl.as_constructable(), store)
        .and_then(downcast::<T>)
}

fn resolve_erased(decl: &dyn Constructable, store: &Store) -> Result<AnyValue, Error> {
    let id = decl.id();
    if let Some(value) = store.get_erased(id) {
        #[cfg(feature = "tracing")]
        tracing::trace!(declaration = %id, "resolved from store");
        return Ok(value);
    }

    let resolved = resolve_dependencies(decl, store)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(declaration = %id, type_name = decl.type_name(), "constructing");

    match decl.construct_erased(&resolved) {
        Ok(value) => Ok(store.insert_if_absent(id, value)),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(declaration = %id, type_name = decl.type_name(), "construction failed: {err}");
            Err(err)
        }
    }
}

fn resolve_dependencies(decl: &dyn Constructable, store: &Store) -> Result<Resolved, Error> {
    decl.dependencies()
        .iter()
        .map(|(name, dependency)| {
            let value = match dependency {
                Dependency::Declaration(nested) => resolve_erased(nested.as_constructable(), store)?,
                Dependency::Value(value) => value.clone(),
            };
            Ok::<_, Error>((name.to_owned(), value))
        })
        .collect()
}

#[inline]
fn downcast<T: Send + Sync + 'static>(value: AnyValue) -> Result<Arc<T>, Error> {
    value
        .downcast::<T>()
        .map_err(|_| Error::ResolveFailed(type_name::<T>()))
}
