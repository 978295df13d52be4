//! Callback-invocation collaborator
//!
//! Active-state predicates are not called directly: an [`Invoker`] calls them
//! and hands them a [`CallScope`] with whatever request state it can supply.

use crate::auth::{Authorizable, Guard};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Stored active-state predicate
pub type Predicate = Arc<dyn Fn(&CallScope<'_>) -> bool + Send + Sync>;

/// Arguments an invoker resolves for a predicate
pub struct CallScope<'a> {
    path: &'a str,
    guard: &'a dyn Guard,
}

impl<'a> CallScope<'a> {
    pub fn new(path: &'a str, guard: &'a dyn Guard) -> Self {
        Self { path, guard }
    }

    /// Path of the request being rendered (e.g. "/admin/users/5")
    pub fn path(&self) -> &str {
        self.path
    }

    /// Current principal, `None` for a guest
    pub fn user(&self) -> Option<Arc<dyn Authorizable>> {
        self.guard.user()
    }

    pub fn allows(&self, ability: &str) -> bool {
        self.guard.allows(ability)
    }
}

/// Calls stored predicates synchronously
pub trait Invoker: Send + Sync {
    fn call(&self, predicate: &Predicate) -> bool;
}

/// Invoker backed by the current request path.
///
/// The path can be swapped between reads; every `call` sees the latest one.
pub struct RequestInvoker {
    guard: Arc<dyn Guard>,
    path: RwLock<String>,
}

impl RequestInvoker {
    pub fn new(guard: Arc<dyn Guard>) -> Self {
        Self {
            guard,
            path: RwLock::new("/".to_string()),
        }
    }

    pub fn with_path(self, path: impl Into<String>) -> Self {
        *self.path.write() = path.into();
        self
    }

    /// Point the invoker at a new request
    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.write() = path.into();
    }

    pub fn path(&self) -> String {
        self.path.read().clone()
    }
}

impl Invoker for RequestInvoker {
    fn call(&self, predicate: &Predicate) -> bool {
        // Predicates may call set_path; don't hold the lock across the call
        let path = self.path();
        predicate(&CallScope::new(&path, self.guard.as_ref()))
    }
}

impl fmt::Debug for RequestInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestInvoker")
            .field("path", &*self.path.read())
            .finish_non_exhaustive()
    }
}
