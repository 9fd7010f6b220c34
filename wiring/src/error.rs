//! Describes dependency resolution errors

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter},
    sync::Arc
};

/// A shared, type-erased error produced by a construction function
pub type SharedError = Arc<
    dyn StdError
    + Send
    + Sync
>;

/// Errors that may occur while building or resolving declarations
#[derive(Debug, Clone)]
pub enum Error {
    /// A construction function asked for a dependency name that is not declared
    MissingDependency(String),
    /// A dependency exists but holds a value of another type
    TypeMismatch {
        /// Name of the dependency
        name: String,
        /// Type that was requested
        expected: &'static str
    },
    /// A cached value could not be downcast to the declared type
    ResolveFailed(&'static str),
    /// A construction function failed
    Construct(SharedError),
    /// Any other failure described by a static message
    Other(&'static str),
}

impl Error {
    /// Wraps an arbitrary error raised by a construction function
    ///
    /// # Example
    /// ```
    /// use wiring::error::Error;
    ///
    /// let err = Error::construct(std::io::Error::other("disk is full"));
    /// assert_eq!(err.to_string(), "disk is full");
    /// ```
    pub fn construct<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>
    {
        Self::Construct(Arc::from(err.into()))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingDependency(name) => write!(f, "Wiring Error: dependency not declared: {name}"),
            Error::TypeMismatch { name, expected } => write!(f, "Wiring Error: dependency {name} is not of type {expected}"),
            Error::ResolveFailed(type_name) => write!(f, "Wiring Error: unable to resolve the value: {type_name}"),
            Error::Construct(err) => write!(f, "{err}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Construct(err) => Some(err.as_ref()),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn it_displays_missing_dependency() {
        let err = Error::MissingDependency("logger".into());

        assert_eq!(err.to_string(), "Wiring Error: dependency not declared: logger");
    }

    #[test]
    fn it_displays_type_mismatch() {
        let err = Error::TypeMismatch { name: "add".into(), expected: "i32" };

        assert_eq!(err.to_string(), "Wiring Error: dependency add is not of type i32");
    }

    #[test]
    fn it_keeps_construct_error_unchanged() {
        let err = Error::construct(IoError::new(ErrorKind::NotFound, "no such file"));

        assert_eq!(err.to_string(), "no such file");

        let source = err.source().unwrap();
        let io = source.downcast_ref::<IoError>().unwrap();

        assert_eq!(io.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn it_wraps_string_errors() {
        let err = Error::construct("boom");

        assert!(matches!(err, Error::Construct(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn cloned_error_shares_source() {
        let err = Error::construct("boom");
        let clone = err.clone();

        match (err, clone) {
            (Error::Construct(a), Error::Construct(b)) => assert!(Arc::ptr_eq(&a, &b)),
            _ => unreachable!()
        }
    }
}
