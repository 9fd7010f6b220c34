//! # Wiring
//!
//! > Minimal, lazy dependency injection: declare a value together with the values it needs,
//! > resolve it once, reuse it everywhere and override any part of the graph in tests.
//!
//! ## Features
//! * Declarations are immutable recipes, nothing is built until it is resolved
//! * Every declaration is constructed at most once per [`Store`]
//! * A process-wide default store, plus any number of independent stores
//! * Override any node of the graph, including deeply nested ones
//! * Optional `tracing` integration
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use wiring::{Dependency, Store, declare, resolve};
//!
//! type BinaryOp = Box<dyn Fn(i32, i32) -> i32 + Send + Sync>;
//!
//! let add = declare!(=> Box::new(|a: i32, b: i32| a + b) as BinaryOp);
//! let calculator = declare!(add: BinaryOp = &add => add);
//!
//! // resolves through the default store
//! let calc = resolve(&calculator).unwrap();
//! assert_eq!(calc(1, 2), 3);
//!
//! // overrides `add` in a separate store
//! let store = Store::new().with(&add, Box::new(|_: i32, _: i32| 10) as BinaryOp);
//! let calc = store.resolve(&calculator).unwrap();
//! assert_eq!(calc(1, 2), 10);
//! ```

use std::{any::Any, sync::Arc};

pub use crate::{
    declaration::{Declaration, DeclarationId, Dependencies, Dependency, ErasedDeclaration},
    error::Error,
    resolve::{resolve, resolve_in},
    resolved::Resolved,
    store::Store,
};

#[macro_use]
mod macros;
mod resolve;

pub mod error;
pub mod declaration;
pub mod resolved;
pub mod store;

/// A shared, type-erased value held by a [`Store`] or passed as a plain dependency
pub type AnyValue = Arc<
    dyn Any
    + Send
    + Sync
>;

/// Builds a new [`Declaration`], same as [`Declaration::new`]
#[inline]
pub fn build<T, F>(dependencies: Dependencies, construct: F) -> Declaration<T>
where
    T: Send + Sync + 'static,
    F: Fn(&Resolved) -> Result<T, Error> + Send + Sync + 'static
{
    Declaration::new(dependencies, construct)
}

/// Creates a new store, independent from the default one, same as [`Store::new`]
#[inline]
pub fn create() -> Store {
    Store::new()
}
