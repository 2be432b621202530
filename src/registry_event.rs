use crate::Token;

/// Events emitted by a registry during operations.
///
/// These events are passed to the callback set via
/// [`Registry::set_trace_callback`](crate::Registry::set_trace_callback).
///
/// # Examples
///
/// ```rust
/// use singleton_injector::RegistryEvent;
///
/// let event = RegistryEvent::Register { token: "logger".into() };
/// assert_eq!(event.to_string(), "register { token: logger }");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// A factory was registered under a token.
    Register { token: Token },

    /// A token was resolved, directly or while wiring another factory.
    Resolve {
        token: Token,
        /// Whether the token was registered.
        found: bool,
    },

    /// A factory ran and its instance was cached. Emitted once per token.
    Instantiate { token: Token },

    /// A registration check was performed.
    Contains { token: Token, found: bool },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { token } => write!(f, "register {{ token: {token} }}"),
            RegistryEvent::Resolve { token, found } => {
                write!(f, "resolve {{ token: {token}, found: {found} }}")
            }
            RegistryEvent::Instantiate { token } => {
                write!(f, "instantiate {{ token: {token} }}")
            }
            RegistryEvent::Contains { token, found } => {
                write!(f, "contains {{ token: {token}, found: {found} }}")
            }
        }
    }
}
