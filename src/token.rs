//! Registry keys.
//!
//! A [`Token`] is either a textual name or an opaque [`Symbol`]. Symbols compare
//! by identity: two independently created symbols are never equal, and a symbol
//! never equals a name token even when its description reads the same.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::RegistryError;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque, identity-compared token.
///
/// Cloning a symbol yields the same identity; creating a new one never does.
///
/// ```rust
/// use singleton_injector::Symbol;
///
/// let a = Symbol::described("logger");
/// let b = Symbol::described("logger");
///
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a fresh symbol without a description.
    pub fn new() -> Self {
        Self::create(None)
    }

    /// Creates a fresh symbol carrying a description used only for display.
    pub fn described(description: impl Into<Arc<str>>) -> Self {
        Self::create(Some(description.into()))
    }

    fn create(description: Option<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// A key under which a dependency is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A textual name such as `"logger"`.
    Name(String),
    /// An opaque identity token.
    Symbol(Symbol),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => f.write_str(name),
            Token::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Token::Name(name.to_owned())
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token::Name(name)
    }
}

impl From<&String> for Token {
    fn from(name: &String) -> Self {
        Token::Name(name.clone())
    }
}

impl From<Symbol> for Token {
    fn from(symbol: Symbol) -> Self {
        Token::Symbol(symbol)
    }
}

impl From<&Symbol> for Token {
    fn from(symbol: &Symbol) -> Self {
        Token::Symbol(symbol.clone())
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

// -------------------------------------------------------------------------------------------------
// Token validation
// -------------------------------------------------------------------------------------------------

/// Conversion of a caller-supplied value into a [`Token`].
///
/// Strings and symbols convert; every other implementor (numbers, booleans,
/// `()` and `None`) is rejected with [`RegistryError::InvalidToken`].
pub trait IntoToken {
    fn into_token(self) -> Result<Token, RegistryError>;
}

macro_rules! impl_valid_token {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoToken for $ty {
                fn into_token(self) -> Result<Token, RegistryError> {
                    Ok(Token::from(self))
                }
            }
        )*
    };
}

impl_valid_token!(Token, &Token, Symbol, &Symbol, &str, String, &String);

macro_rules! impl_invalid_token {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoToken for $ty {
                fn into_token(self) -> Result<Token, RegistryError> {
                    Err(RegistryError::InvalidToken {
                        token: format!("{self:?}"),
                    })
                }
            }
        )*
    };
}

impl_invalid_token!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<T: IntoToken> IntoToken for Option<T> {
    fn into_token(self) -> Result<Token, RegistryError> {
        match self {
            Some(token) => token.into_token(),
            None => Err(RegistryError::InvalidToken {
                token: "None".to_string(),
            }),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
