use thiserror::Error;

use crate::Token;

/// Errors reported by [`Registry`](crate::Registry) operations.
///
/// Every error is returned to the direct caller of the operation that detected it;
/// nothing is retried or aggregated internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("token `{token}` must be either a string or a symbol")]
    InvalidToken { token: String },

    #[error("token `{token}` is already registered")]
    DuplicateToken { token: Token },

    #[error("token `{token}` is not registered")]
    UnregisteredToken { token: Token },

    #[error("factory for `{token}` cannot be invoked: {reason}")]
    InvalidFactory { token: Token, reason: String },

    #[error("arguments for `{token}` are malformed: {reason}")]
    InvalidArgSpec { token: Token, reason: String },

    #[error("no dependency is wired to parameter `{name}`")]
    MissingDependency { name: String },

    #[error("instance for `{token}` is not of type `{expected}`")]
    TypeMismatch {
        token: Token,
        expected: &'static str,
    },
}
