//! Service container that creates navigation entries
//!
//! Holds the collaborators every item needs and an optional factory per
//! entry type, so a host application can substitute its own construction for
//! any `NavigationEntry` type without touching the call sites that `make` it.

use crate::auth::Guard;
use crate::invoker::{Invoker, RequestInvoker};
use crate::item::{NavigationEntry, NavigationItem};
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Collaborators injected into every item the container creates
#[derive(Clone)]
pub struct Services {
    pub guard: Arc<dyn Guard>,
    pub invoker: Arc<dyn Invoker>,
}

impl Services {
    pub fn new(guard: Arc<dyn Guard>, invoker: Arc<dyn Invoker>) -> Self {
        Self { guard, invoker }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

type Factory = Arc<dyn Fn(Option<&str>, &Container) -> Box<dyn Any> + Send + Sync>;

/// Creates navigation entries with their collaborators wired in
pub struct Container {
    services: Services,
    bindings: RwLock<HashMap<TypeId, Factory>>,
}

impl Container {
    pub fn new(guard: Arc<dyn Guard>, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            services: Services::new(guard, invoker),
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Container whose invoker sees the root request path ("/")
    pub fn with_guard(guard: Arc<dyn Guard>) -> Self {
        let invoker = Arc::new(RequestInvoker::new(Arc::clone(&guard)));
        Self::new(guard, invoker)
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn guard(&self) -> &Arc<dyn Guard> {
        &self.services.guard
    }

    pub fn invoker(&self) -> &Arc<dyn Invoker> {
        &self.services.invoker
    }

    /// Register a custom factory for entry type `T`.
    ///
    /// Replaces any earlier binding for the same type. The factory receives
    /// the label passed to `make` and this container.
    pub fn bind<T, F>(&self, factory: F)
    where
        T: NavigationEntry,
        F: Fn(Option<&str>, &Container) -> T + Send + Sync + 'static,
    {
        debug!(entry = type_name::<T>(), "binding navigation entry factory");
        let factory: Factory = Arc::new(
            move |label: Option<&str>, container: &Container| -> Box<dyn Any> {
                Box::new(factory(label, container))
            },
        );
        self.bindings.write().insert(TypeId::of::<T>(), factory);
    }

    pub fn is_bound<T: NavigationEntry>(&self) -> bool {
        self.bindings.read().contains_key(&TypeId::of::<T>())
    }

    /// Base item carrying this container's collaborators.
    ///
    /// A non-blank label is applied; `None`, `""` or whitespace leaves the
    /// label unset.
    pub fn item(&self, label: Option<&str>) -> NavigationItem {
        NavigationItem::new(self.services.clone(), label)
    }

    /// Create an entry of type `T`, through its binding if one exists
    pub fn make<T: NavigationEntry>(&self, label: Option<&str>) -> T {
        // Clone the factory out so it can call back into the container
        let factory = self.bindings.read().get(&TypeId::of::<T>()).cloned();

        // Bindings are keyed by the type their factory returns
        let bound = factory.and_then(|factory| factory(label, self).downcast::<T>().ok());
        if let Some(entry) = bound {
            return *entry;
        }

        T::from_item(self.item(label))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticGuard;

    #[derive(Debug)]
    struct ResourceItem {
        inner: NavigationItem,
        resource: &'static str,
    }

    impl NavigationEntry for ResourceItem {
        fn from_item(item: NavigationItem) -> Self {
            Self {
                inner: item,
                resource: "unknown",
            }
        }

        fn item(&self) -> &NavigationItem {
            &self.inner
        }

        fn item_mut(&mut self) -> &mut NavigationItem {
            &mut self.inner
        }
    }

    fn container() -> Container {
        Container::with_guard(Arc::new(StaticGuard::guest()))
    }

    #[test]
    fn test_make_without_binding() {
        let container = container();
        let item: ResourceItem = container.make(Some("Users"));

        assert_eq!(item.get_label(), "Users");
        assert_eq!(item.resource, "unknown");
        assert!(!container.is_bound::<ResourceItem>());
    }

    #[test]
    fn test_make_uses_binding() {
        let container = container();
        container.bind(|label, container: &Container| ResourceItem {
            inner: container.item(label).icon("heroicon-o-users"),
            resource: "users",
        });

        let item = ResourceItem::make(&container, Some("Users"));

        assert!(container.is_bound::<ResourceItem>());
        assert_eq!(item.resource, "users");
        assert_eq!(item.get_label(), "Users");
        assert_eq!(item.get_icon(), "heroicon-o-users");
    }

    #[test]
    fn test_binding_is_per_type() {
        let container = container();
        container.bind(|label, container: &Container| ResourceItem {
            inner: container.item(label),
            resource: "users",
        });

        let plain: NavigationItem = container.make(Some("Dashboard"));
        assert_eq!(plain.get_label(), "Dashboard");
        assert!(!container.is_bound::<NavigationItem>());
    }

    #[test]
    fn test_empty_label_is_ignored() {
        let container = container();
        let item = container.item(Some(""));
        assert_eq!(item.get_label(), "");
        assert!(item.validate().is_err());

        let item: NavigationItem = container.make(Some("   "));
        assert_eq!(item.get_label(), "");
        assert!(item.validate().is_err());
    }
}
