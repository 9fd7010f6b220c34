//! Macros for declaring values with typed dependencies

/// A `declare!` macro that builds a [`Declaration`](crate::Declaration) whose
/// dependencies are bound to typed names inside the construction body.
///
/// # Macro Syntax
/// ```ignore
/// declare!(name1: Type1 = dependency1, name2: Type2 = dependency2 => body);
/// declare!(=> body);
/// ```
/// Every `dependency` is anything convertible into a [`Dependency`](crate::Dependency):
/// `&declaration`, `declaration` or [`Dependency::value`](crate::Dependency::value).
/// Inside `body` each name is bound to an `Arc<Type>` of the resolved value.
/// The body evaluates to the constructed value.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use wiring::{Dependency, Store, declare};
///
/// struct Greeter {
///     greeting: Arc<String>,
///     name: Arc<&'static str>,
/// }
///
/// let greeting = declare!(=> String::from("Hello"));
/// let greeter = declare!(
///     greeting: String = &greeting,
///     name: &'static str = Dependency::value("world")
///     => Greeter { greeting, name }
/// );
///
/// let greeter = Store::new().resolve(&greeter).unwrap();
/// assert_eq!(format!("{} {}", greeter.greeting, greeter.name), "Hello world");
/// ```
///
/// # Errors
/// The generated construction function fails with
/// [`Error::TypeMismatch`](crate::error::Error::TypeMismatch) when a dependency
/// resolves to a value of another type than the one written next to its name.
#[macro_export]
macro_rules! declare {
    (=> $body:expr) => {
        $crate::Declaration::new(
            $crate::Dependencies::new(),
            move |_: &$crate::Resolved| Ok::<_, $crate::error::Error>($body)
        )
    };
    ($($name:ident : $ty:ty = $dep:expr),+ $(,)? => $body:expr) => {
        $crate::Declaration::new(
            $crate::Dependencies::new()
                $(.with(stringify!($name), $dep))+,
            move |resolved: &$crate::Resolved| {
                $(let $name = resolved.get::<$ty>(stringify!($name))?;)+
                Ok::<_, $crate::error::Error>($body)
            }
        )
    };
}
