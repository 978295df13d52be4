//! Values that are either known now or computed on demand

use std::fmt;
use std::sync::Arc;

/// A literal value or a zero-argument callback producing one.
///
/// `resolve()` invokes the callback on every call; nothing is cached.
pub enum Deferred<T> {
    Value(T),
    Lazy(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T> Deferred<T> {
    /// Wrap a callback evaluated at resolve time
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Deferred::Lazy(Arc::new(f))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Deferred::Lazy(_))
    }
}

impl<T: Clone> Deferred<T> {
    /// Current value, invoking the callback if there is one
    pub fn resolve(&self) -> T {
        match self {
            Deferred::Value(value) => value.clone(),
            Deferred::Lazy(f) => f(),
        }
    }
}

impl<T> Clone for Deferred<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Deferred::Value(value) => Deferred::Value(value.clone()),
            Deferred::Lazy(f) => Deferred::Lazy(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Deferred::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Deferred::Value(value)
    }
}

impl From<&str> for Deferred<Option<String>> {
    fn from(value: &str) -> Self {
        Deferred::Value(Some(value.to_string()))
    }
}

impl From<String> for Deferred<Option<String>> {
    fn from(value: String) -> Self {
        Deferred::Value(Some(value))
    }
}
