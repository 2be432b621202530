//! # Singleton Injector
//!
//! A dependency injection registry keyed by tokens. Callers register factories under
//! string or symbol tokens and resolve them by token; each factory runs at most once,
//! on first demand, and its instance is shared by every later resolution.
//!
//! Factories can depend on other tokens. Dependencies are wired either positionally,
//! with each resolved value passed as a separate argument, or by name, with all of
//! them passed as a single [`Dependencies`] map.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_injector::{positional, named, Registry};
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Database {
//!     config: Arc<Config>,
//! }
//!
//! let registry = Registry::new();
//!
//! // Dependents may be registered before their dependencies.
//! registry.register_with("db", |config: Arc<Config>| Database { config }, positional!["config"])?;
//! registry.register("config", || Config { url: "postgres://localhost".into() })?;
//!
//! let db: Arc<Database> = registry.resolve("db")?;
//! assert_eq!(db.config.url, "postgres://localhost");
//! # Ok::<(), singleton_injector::RegistryError>(())
//! ```
//!
//! ## Features
//!
//! - **Lazy singletons**: factories run on first resolution, never twice
//! - **Typed tokens**: strings, or identity-compared [`Symbol`]s
//! - **Thread-safe**: a registry can be shared across threads
//! - **Tracing support**: `tracing` logs plus an optional per-registry event callback
//!
//! ## Main Operations
//!
//! - [`Registry::register`] - Register a factory without dependencies under a token
//! - [`Registry::register_with`] - Register a factory wired to other tokens
//! - [`Registry::resolve`] - Resolve a token as `Arc<T>`
//! - [`Registry::resolve_array`] - Resolve a list of tokens in order
//! - [`Registry::resolve_dictionary`] - Resolve a name-to-token mapping
//! - [`Registry::set_trace_callback`] - Observe registry operations

mod arg_spec;
mod factory;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod token;

// Re-export the main public API
pub use arg_spec::{ArgSpec, Dependencies};
pub use factory::{Factory, Instance, IntoFactory, NamedArgs, PositionalArgs};
pub use registry::{Registry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use token::{IntoToken, Symbol, Token};
