//! How a factory's arguments are wired.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::{Instance, RegistryError, Token};

/// The dependencies a factory receives, in one of two wiring styles.
///
/// The default is an empty [`ArgSpec::Named`] mapping, which suits factories that
/// take no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSpec {
    /// Tokens resolved in order and passed as separate positional arguments.
    Positional(Vec<Token>),
    /// Parameter names mapped to tokens, passed as a single [`Dependencies`] value.
    Named(BTreeMap<String, Token>),
}

impl Default for ArgSpec {
    fn default() -> Self {
        ArgSpec::Named(BTreeMap::new())
    }
}

impl ArgSpec {
    pub fn positional<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        ArgSpec::Positional(tokens.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Token>,
    {
        ArgSpec::Named(
            entries
                .into_iter()
                .map(|(name, token)| (name.into(), token.into()))
                .collect(),
        )
    }

    /// Number of dependencies wired.
    pub fn len(&self) -> usize {
        match self {
            ArgSpec::Positional(tokens) => tokens.len(),
            ArgSpec::Named(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects named specs with an empty parameter name.
    pub(crate) fn check(&self, owner: &Token) -> Result<(), RegistryError> {
        if let ArgSpec::Named(entries) = self {
            if let Some(token) = entries
                .iter()
                .find_map(|(name, token)| name.is_empty().then_some(token))
            {
                return Err(RegistryError::InvalidArgSpec {
                    token: owner.clone(),
                    reason: format!("dependency `{token}` is wired to an empty parameter name"),
                });
            }
        }
        Ok(())
    }
}

/// Resolved named dependencies, keyed by parameter name.
///
/// Handed to named-wiring factories and returned by
/// [`Registry::resolve_dictionary`](crate::Registry::resolve_dictionary).
#[derive(Clone, Default)]
pub struct Dependencies {
    values: HashMap<String, Instance>,
    tokens: HashMap<String, Token>,
}

impl Dependencies {
    pub(crate) fn insert(&mut self, name: String, token: Token, instance: Instance) {
        self.tokens.insert(name.clone(), token);
        self.values.insert(name, instance);
    }

    /// Returns the dependency bound to `name`, downcast to `T`.
    ///
    /// `None` if no dependency has that name or it is not a `T`. Use
    /// [`Dependencies::try_get`] to tell the two apart.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.try_get(name).ok()
    }

    /// Returns the dependency bound to `name`, downcast to `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingDependency`] if no dependency has that name
    /// - [`RegistryError::TypeMismatch`] naming the dependency's token if it is not a `T`
    pub fn try_get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, RegistryError> {
        let (Some(instance), Some(token)) = (self.values.get(name), self.tokens.get(name)) else {
            return Err(RegistryError::MissingDependency {
                name: name.to_string(),
            });
        };

        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                token: token.clone(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Returns the dependency bound to `name` without downcasting it.
    pub fn instance(&self, name: &str) -> Option<&Instance> {
        self.values.get(name)
    }

    /// Returns the token the dependency bound to `name` was resolved from.
    pub fn token(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

impl IntoIterator for Dependencies {
    type Item = (String, Instance);
    type IntoIter = std::collections::hash_map::IntoIter<String, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
