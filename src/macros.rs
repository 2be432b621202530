//! Macros for building argument specs.

/// Builds an [`ArgSpec::Positional`](crate::ArgSpec::Positional) from token expressions.
///
/// Each expression is converted with `Token::from`, so string slices, `String`s and
/// symbols (owned or borrowed) can be mixed.
///
/// # Examples
///
/// ```rust
/// use singleton_injector::{positional, ArgSpec, Symbol, Token};
///
/// let cache = Symbol::described("cache");
/// let spec = positional!["db", &cache];
///
/// assert_eq!(spec, ArgSpec::Positional(vec![Token::from("db"), Token::from(cache)]));
/// ```
#[macro_export]
macro_rules! positional {
    () => {
        $crate::ArgSpec::Positional(::std::vec::Vec::new())
    };
    ($($token:expr),+ $(,)?) => {
        $crate::ArgSpec::Positional(::std::vec![$($crate::Token::from($token)),+])
    };
}

/// Builds an [`ArgSpec::Named`](crate::ArgSpec::Named) from `name => token` pairs.
///
/// An empty invocation yields the default spec, an empty mapping.
///
/// # Examples
///
/// ```rust
/// use singleton_injector::{named, ArgSpec};
///
/// let spec = named! {
///     logger => "app.logger",
///     db => "app.db",
/// };
///
/// assert_eq!(spec, ArgSpec::named([("logger", "app.logger"), ("db", "app.db")]));
/// assert_eq!(named! {}, ArgSpec::default());
/// ```
#[macro_export]
macro_rules! named {
    () => {
        $crate::ArgSpec::default()
    };
    ($($name:ident => $token:expr),+ $(,)?) => {
        $crate::ArgSpec::Named(::std::collections::BTreeMap::from([
            $((::std::string::String::from(::std::stringify!($name)), $crate::Token::from($token))),+
        ]))
    };
}
