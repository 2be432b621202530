//! A token-keyed dependency injection registry with lazily instantiated singletons.
//!
//! Each token maps to a binding made of a factory, the [`ArgSpec`] wiring its
//! arguments, and an instantiation state. A factory runs at most once, on the first
//! resolution that reaches its token, and every later resolution returns the cached
//! instance.
//!
//! # Examples
//!
//! ```
//! use singleton_injector::{named, Factory, Registry};
//! use std::sync::Arc;
//!
//! struct Logger {
//!     level: &'static str,
//! }
//!
//! struct Service {
//!     log: Arc<Logger>,
//! }
//!
//! let registry = Registry::new();
//! registry.register("logger", || Logger { level: "info" })?;
//! registry.register_with(
//!     "service",
//!     Factory::try_named(|deps| {
//!         Ok(Service {
//!             log: deps.try_get("logger")?,
//!         })
//!     }),
//!     named! { logger => "logger" },
//! )?;
//!
//! let service: Arc<Service> = registry.resolve("service")?;
//! let logger: Arc<Logger> = registry.resolve("logger")?;
//! assert!(Arc::ptr_eq(&service.log, &logger));
//! assert_eq!(logger.level, "info");
//! # Ok::<(), singleton_injector::RegistryError>(())
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace, warn};

use crate::factory::Arguments;
use crate::{
    ArgSpec, Dependencies, Factory, Instance, IntoFactory, IntoToken, RegistryError,
    RegistryEvent, Token,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because the registry itself may be shared.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Instantiation state of a binding.
enum Instantiation {
    Uninstantiated,
    Instance(Instance),
}

struct Binding {
    factory: Factory,
    arg_spec: ArgSpec,
    // Held while the factory runs so concurrent resolutions of the same token
    // invoke it once.
    state: Mutex<Instantiation>,
}

impl Binding {
    fn new(factory: Factory, arg_spec: ArgSpec) -> Self {
        Self {
            factory,
            arg_spec,
            state: Mutex::new(Instantiation::Uninstantiated),
        }
    }
}

/// The dependency registry.
///
/// Registries are independent: each owns its bindings and trace callback, and
/// nothing is shared between two instances.
#[derive(Default)]
pub struct Registry {
    bindings: Mutex<HashMap<Token, Arc<Binding>>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback invoked for every registry operation.
    ///
    /// The callback is invoked without the token map locked. It must not resolve
    /// a token whose factory is still running.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    // No user code runs while this lock is held, so poisoning carries no torn state.
    fn lock_bindings(&self) -> MutexGuard<'_, HashMap<Token, Arc<Binding>>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a factory that takes no dependencies under `token`.
    ///
    /// Shorthand for [`Registry::register_with`] with [`ArgSpec::default()`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::register_with`].
    pub fn register<M>(
        &self,
        token: impl IntoToken,
        factory: impl IntoFactory<M>,
    ) -> Result<(), RegistryError> {
        self.register_with(token, factory, ArgSpec::default())
    }

    /// Registers `factory` under `token`, wiring its arguments as `args` describes.
    ///
    /// The factory is not invoked here; it runs on the first resolution of `token`.
    /// Dependencies named in `args` only need to be registered by then.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`RegistryError::InvalidToken`] if `token` is not a string or symbol
    /// - [`RegistryError::DuplicateToken`] if `token` is already registered
    /// - [`RegistryError::InvalidFactory`] if the factory takes a different number
    ///   of positional arguments than `args` supplies
    /// - [`RegistryError::InvalidArgSpec`] if `args` uses a wiring style the factory
    ///   does not take, or names a parameter with an empty string
    ///
    /// # Deadlocks
    ///
    /// Cycles are not detected. A token wired to itself, directly or through other
    /// tokens, blocks forever (or panics, depending on the platform) on its first
    /// resolution.
    pub fn register_with<M>(
        &self,
        token: impl IntoToken,
        factory: impl IntoFactory<M>,
        args: ArgSpec,
    ) -> Result<(), RegistryError> {
        let token = token.into_token()?;
        let factory = factory.into_factory();

        {
            let mut bindings = self.lock_bindings();
            if bindings.contains_key(&token) {
                return Err(RegistryError::DuplicateToken { token });
            }

            factory.check_arity(&token, &args)?;
            factory.check_wiring(&token, &args)?;

            debug!(
                token = %token,
                output = factory.output(),
                dependencies = args.len(),
                "registered factory"
            );
            bindings.insert(token.clone(), Arc::new(Binding::new(factory, args)));
        }

        self.emit_event(RegistryEvent::Register { token });
        Ok(())
    }

    /// Returns `true` if `token` is registered.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidToken`] if `token` is not a string or symbol.
    pub fn contains(&self, token: impl IntoToken) -> Result<bool, RegistryError> {
        let token = token.into_token()?;
        let found = self.lock_bindings().contains_key(&token);

        self.emit_event(RegistryEvent::Contains { token, found });
        Ok(found)
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.lock_bindings().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_bindings().is_empty()
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolves `token` and downcasts the instance to `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidToken`] or [`RegistryError::UnregisteredToken`]
    ///   for `token` itself or any dependency it is wired to
    /// - [`RegistryError::TypeMismatch`] if the instance is not a `T`
    /// - any error raised while wiring the factory's arguments
    pub fn resolve<T: Send + Sync + 'static>(
        &self,
        token: impl IntoToken,
    ) -> Result<Arc<T>, RegistryError> {
        let token = token.into_token()?;

        self.instantiate(&token)?
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                token,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Resolves `token` and returns a clone of the instance.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::resolve`].
    pub fn resolve_cloned<T: Send + Sync + Clone + 'static>(
        &self,
        token: impl IntoToken,
    ) -> Result<T, RegistryError> {
        let instance = self.resolve::<T>(token)?;
        Ok((*instance).clone())
    }

    /// Resolves `token` without downcasting the instance.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::resolve`], minus the type check.
    pub fn resolve_instance(&self, token: impl IntoToken) -> Result<Instance, RegistryError> {
        let token = token.into_token()?;
        self.instantiate(&token)
    }

    /// Resolves each token in order.
    ///
    /// The result has the same length and order as `tokens`. The first failing
    /// token aborts the call.
    pub fn resolve_array<I>(&self, tokens: I) -> Result<Vec<Instance>, RegistryError>
    where
        I: IntoIterator,
        I::Item: IntoToken,
    {
        tokens
            .into_iter()
            .map(|token| self.resolve_instance(token))
            .collect()
    }

    /// Resolves each token of a name-to-token mapping, keeping the names.
    ///
    /// The first failing token aborts the call.
    pub fn resolve_dictionary<I, K, T>(&self, entries: I) -> Result<Dependencies, RegistryError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: IntoToken,
    {
        let mut dependencies = Dependencies::default();
        for (name, token) in entries {
            let token = token.into_token()?;
            let instance = self.instantiate(&token)?;
            dependencies.insert(name.into(), token, instance);
        }
        Ok(dependencies)
    }

    fn instantiate(&self, token: &Token) -> Result<Instance, RegistryError> {
        let binding = self.lock_bindings().get(token).cloned();

        let Some(binding) = binding else {
            self.emit_event(RegistryEvent::Resolve {
                token: token.clone(),
                found: false,
            });
            return Err(RegistryError::UnregisteredToken {
                token: token.clone(),
            });
        };

        let (instance, created) = self.instantiate_binding(token, &binding)?;

        if created {
            self.emit_event(RegistryEvent::Instantiate {
                token: token.clone(),
            });
        }
        self.emit_event(RegistryEvent::Resolve {
            token: token.clone(),
            found: true,
        });

        Ok(instance)
    }

    /// Returns the cached instance, or runs the factory and caches its result.
    ///
    /// Nothing is committed when wiring or the factory fails, leaving the binding
    /// uninstantiated for a later retry. A panicking factory poisons the state
    /// lock without having written to it, so the poison is discarded.
    fn instantiate_binding(
        &self,
        token: &Token,
        binding: &Binding,
    ) -> Result<(Instance, bool), RegistryError> {
        let mut state = binding
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Instantiation::Instance(instance) = &*state {
            trace!(token = %token, "resolved cached instance");
            return Ok((Arc::clone(instance), false));
        }

        let instance = self
            .wire(&binding.arg_spec)
            .and_then(|arguments| binding.factory.invoke(token, arguments))
            .inspect_err(|err| warn!(token = %token, error = %err, "instantiation failed"))?;

        *state = Instantiation::Instance(Arc::clone(&instance));
        debug!(token = %token, output = binding.factory.output(), "instantiated");

        Ok((instance, true))
    }

    fn wire(&self, spec: &ArgSpec) -> Result<Arguments, RegistryError> {
        match spec {
            ArgSpec::Positional(tokens) => tokens
                .iter()
                .map(|token| {
                    self.instantiate(token)
                        .map(|instance| (token.clone(), instance))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Arguments::Positional),
            ArgSpec::Named(entries) => self.resolve_dictionary(entries).map(Arguments::Named),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.lock_bindings();
        f.debug_struct("Registry")
            .field("tokens", &bindings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
