//! Authorization collaborator
//!
//! Items never look up the current user themselves. A [`Guard`] is injected
//! through the [`Container`](crate::Container) and asked at check time.

use adminnav_types::Principal;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Something that can be asked whether it holds an ability
pub trait Authorizable: Send + Sync {
    fn can(&self, ability: &str) -> bool;
}

/// Source of the currently authenticated principal
///
/// Implementations:
/// - `StaticGuard`: fixed user (or guest), used by the CLI and tests
/// - host applications: session/request backed guards
pub trait Guard: Send + Sync {
    /// Current principal, `None` for a guest
    fn user(&self) -> Option<Arc<dyn Authorizable>>;

    /// Whether the current principal holds `ability`.
    ///
    /// A guest never holds any ability; this never fails.
    fn allows(&self, ability: &str) -> bool {
        let allowed = self.user().is_some_and(|user| user.can(ability));
        trace!(ability, allowed, "ability check");
        allowed
    }
}

impl Authorizable for Principal {
    fn can(&self, ability: &str) -> bool {
        self.has_ability(ability)
    }
}

/// Guard returning the same principal on every call
#[derive(Clone, Default)]
pub struct StaticGuard {
    user: Option<Arc<dyn Authorizable>>,
}

impl StaticGuard {
    /// No authenticated principal
    pub fn guest() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: impl Authorizable + 'static) -> Self {
        Self {
            user: Some(Arc::new(user)),
        }
    }
}

impl Guard for StaticGuard {
    fn user(&self) -> Option<Arc<dyn Authorizable>> {
        self.user.clone()
    }
}

impl fmt::Debug for StaticGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticGuard")
            .field("authenticated", &self.user.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_allows_nothing() {
        let guard = StaticGuard::guest();
        assert!(guard.user().is_none());
        assert!(!guard.allows("view-users"));
    }

    #[test]
    fn test_authenticated_principal_abilities() {
        let guard = StaticGuard::authenticated(Principal::new("ada").with_ability("view-users"));

        assert!(guard.allows("view-users"));
        assert!(!guard.allows("edit-users"));
    }

    #[test]
    fn test_custom_authorizable() {
        struct SuperAdmin;
        impl Authorizable for SuperAdmin {
            fn can(&self, _ability: &str) -> bool {
                true
            }
        }

        let guard = StaticGuard::authenticated(SuperAdmin);
        assert!(guard.allows("anything"));
    }
}
