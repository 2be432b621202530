//! Type-erased factories and the closure shapes that convert into them.
//!
//! A closure of the form `Fn(Arc<A>, Arc<B>, ..) -> T` (up to eight parameters)
//! is a *positional* factory: it is wired with [`ArgSpec::Positional`] and each
//! resolved dependency is downcast to its parameter type. A closure of the form
//! `Fn(&Dependencies) -> T` is a *named* factory, wired with [`ArgSpec::Named`].
//! A closure without parameters accepts an empty positional list or any named
//! spec; named dependencies are still resolved first. [`Factory::try_named`] wraps a
//! named closure returning `Result`.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{ArgSpec, Dependencies, RegistryError, Token};

/// A type-erased dependency instance as stored in the registry.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Resolved values handed to a factory.
pub(crate) enum Arguments {
    Positional(Vec<(Token, Instance)>),
    Named(Dependencies),
}

impl Arguments {
    fn into_positional(self) -> Vec<(Token, Instance)> {
        match self {
            Arguments::Positional(values) => values,
            Arguments::Named(_) => Vec::new(),
        }
    }

    fn into_dependencies(self) -> Dependencies {
        match self {
            Arguments::Named(dependencies) => dependencies,
            Arguments::Positional(_) => Dependencies::default(),
        }
    }
}

/// The argument shape a factory can be invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wiring {
    Positional(usize),
    Named,
}

type Invoke = dyn Fn(&Token, Arguments) -> Result<Instance, RegistryError> + Send + Sync;

/// A callable producing one dependency instance.
pub struct Factory {
    wiring: Wiring,
    output: &'static str,
    invoke: Box<Invoke>,
}

impl Factory {
    fn new<F>(wiring: Wiring, output: &'static str, invoke: F) -> Self
    where
        F: Fn(&Token, Arguments) -> Result<Instance, RegistryError> + Send + Sync + 'static,
    {
        Self {
            wiring,
            output,
            invoke: Box::new(invoke),
        }
    }

    /// Builds a named factory that can fail.
    ///
    /// An error returned by `f` is returned from the resolution that ran it, and
    /// the token stays uninstantiated.
    ///
    /// ```
    /// use singleton_injector::{named, Factory, Registry, RegistryError};
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new();
    /// registry.register("port", || 8080u16)?;
    /// registry.register_with(
    ///     "url",
    ///     Factory::try_named(|deps| {
    ///         let port = deps.try_get::<u32>("port")?;
    ///         Ok(format!("localhost:{port}"))
    ///     }),
    ///     named! { port => "port" },
    /// )?;
    ///
    /// assert_eq!(
    ///     registry.resolve::<String>("url").err(),
    ///     Some(RegistryError::TypeMismatch { token: "port".into(), expected: "u32" })
    /// );
    /// # Ok::<(), RegistryError>(())
    /// ```
    pub fn try_named<F, T>(f: F) -> Self
    where
        F: Fn(&Dependencies) -> Result<T, RegistryError> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        Factory::new(Wiring::Named, type_name::<T>(), move |_, arguments| {
            f(&arguments.into_dependencies()).map(|value| Arc::new(value) as Instance)
        })
    }

    /// Type name of the instance this factory produces.
    pub fn output(&self) -> &'static str {
        self.output
    }

    #[cfg(test)]
    pub(crate) fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Fails with `InvalidFactory` when a positional factory takes a different
    /// number of arguments than `spec` supplies.
    ///
    /// A factory without parameters accepts any named spec. Its dependencies are
    /// still resolved before it runs.
    pub(crate) fn check_arity(&self, owner: &Token, spec: &ArgSpec) -> Result<(), RegistryError> {
        let reason = match (self.wiring, spec) {
            (Wiring::Positional(arity), ArgSpec::Positional(tokens)) if arity != tokens.len() => {
                format!("it takes {arity} arguments but {} tokens were given", tokens.len())
            }
            _ => return Ok(()),
        };

        Err(RegistryError::InvalidFactory {
            token: owner.clone(),
            reason,
        })
    }

    /// Fails with `InvalidArgSpec` when `spec` uses a wiring style the factory
    /// does not take.
    pub(crate) fn check_wiring(&self, owner: &Token, spec: &ArgSpec) -> Result<(), RegistryError> {
        let reason = match (self.wiring, spec) {
            (Wiring::Named, ArgSpec::Positional(_)) => {
                "factory takes named dependencies but the arguments are positional"
            }
            (Wiring::Positional(arity), ArgSpec::Named(_)) if arity > 0 => {
                "factory takes positional arguments but the arguments are named"
            }
            _ => return spec.check(owner),
        };

        Err(RegistryError::InvalidArgSpec {
            token: owner.clone(),
            reason: reason.to_string(),
        })
    }

    pub(crate) fn invoke(&self, owner: &Token, arguments: Arguments) -> Result<Instance, RegistryError> {
        (self.invoke)(owner, arguments)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("wiring", &self.wiring)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Marker for factories taking resolved dependencies as separate arguments.
pub struct PositionalArgs<Args>(PhantomData<fn() -> Args>);

/// Marker for factories taking a single [`Dependencies`] argument.
pub struct NamedArgs;

/// Conversion of a closure into a [`Factory`].
///
/// `Marker` only disambiguates the closure shapes; callers never name it.
pub trait IntoFactory<Marker> {
    fn into_factory(self) -> Factory;
}

impl IntoFactory<Factory> for Factory {
    fn into_factory(self) -> Factory {
        self
    }
}

impl<F, T> IntoFactory<NamedArgs> for F
where
    F: Fn(&Dependencies) -> T + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn into_factory(self) -> Factory {
        Factory::new(Wiring::Named, type_name::<T>(), move |_, arguments| {
            Ok(Arc::new(self(&arguments.into_dependencies())) as Instance)
        })
    }
}

fn downcast_next<A, I>(owner: &Token, values: &mut I) -> Result<Arc<A>, RegistryError>
where
    A: Send + Sync + 'static,
    I: Iterator<Item = (Token, Instance)>,
{
    let (token, instance) = values.next().ok_or_else(|| RegistryError::InvalidFactory {
        token: owner.clone(),
        reason: "fewer arguments were resolved than it takes".to_string(),
    })?;

    instance.downcast::<A>().map_err(|_| RegistryError::TypeMismatch {
        token,
        expected: type_name::<A>(),
    })
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_positional_factory {
    ($($arg:ident),*) => {
        impl<F, T, $($arg,)*> IntoFactory<PositionalArgs<($($arg,)*)>> for F
        where
            F: Fn($(Arc<$arg>),*) -> T + Send + Sync + 'static,
            T: Send + Sync + 'static,
            $($arg: Send + Sync + 'static,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_factory(self) -> Factory {
                let wiring = Wiring::Positional(count!($($arg)*));
                Factory::new(wiring, type_name::<T>(), move |owner, arguments| {
                    let mut values = arguments.into_positional().into_iter();
                    $(let $arg = downcast_next::<$arg, _>(owner, &mut values)?;)*
                    Ok(Arc::new(self($($arg),*)) as Instance)
                })
            }
        }
    };
}

impl_positional_factory!();
impl_positional_factory!(A1);
impl_positional_factory!(A1, A2);
impl_positional_factory!(A1, A2, A3);
impl_positional_factory!(A1, A2, A3, A4);
impl_positional_factory!(A1, A2, A3, A4, A5);
impl_positional_factory!(A1, A2, A3, A4, A5, A6);
impl_positional_factory!(A1, A2, A3, A4, A5, A6, A7);
impl_positional_factory!(A1, A2, A3, A4, A5, A6, A7, A8);

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
