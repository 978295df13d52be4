//! Integration tests for navigation items built through a container
//!
//! Covers:
//! - host-defined entry types created by the shared factory
//! - evaluation timing (visibility snapshot vs per-read URL / active state)
//! - manifests loaded from disk
//!
//! Run with:
//! ```bash
//! cargo test --test navigation_item_tests
//! ```

use adminnav_core::{
    Container, Deferred, Guard, LoadReport, MenuManifest, NavError, NavigationEntry,
    NavigationItem, Principal, RequestInvoker, StaticGuard,
};
use std::fs;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Host-side entry type carrying a resource name next to the item
#[derive(Debug)]
struct ResourceEntry {
    item: NavigationItem,
    resource: String,
}

impl ResourceEntry {
    fn resource(mut self, resource: &str) -> Self {
        self.resource = resource.to_string();
        self
    }
}

impl NavigationEntry for ResourceEntry {
    fn from_item(item: NavigationItem) -> Self {
        Self {
            item,
            resource: String::new(),
        }
    }

    fn item(&self) -> &NavigationItem {
        &self.item
    }

    fn item_mut(&mut self) -> &mut NavigationItem {
        &mut self.item
    }
}

fn request(guard: StaticGuard, path: &str) -> (Container, Arc<RequestInvoker>) {
    let guard: Arc<dyn Guard> = Arc::new(guard);
    let invoker = Arc::new(RequestInvoker::new(Arc::clone(&guard)).with_path(path));
    (Container::new(guard, invoker.clone()), invoker)
}

mod factory {
    use super::*;

    #[test]
    fn test_setters_return_the_host_type() {
        let (container, _) = request(StaticGuard::guest(), "/");

        // Chaining keeps the concrete type, so host methods stay reachable
        let entry = ResourceEntry::make(&container, Some("Users"))
            .icon("heroicon-o-users")
            .sort(Some(3))
            .resource("users")
            .badge(Some("7"), None);

        assert_eq!(entry.resource, "users");
        assert_eq!(entry.get_label(), "Users");
        assert_eq!(entry.get_sort(), 3);
        assert_eq!(entry.get_badge(), Some("7"));
    }

    #[test]
    fn test_binding_overrides_construction_everywhere() {
        let (container, _) = request(StaticGuard::guest(), "/");
        container.bind(|label, container: &Container| {
            ResourceEntry::from_item(container.item(label).icon("heroicon-o-cube"))
                .resource("default")
        });

        let manifest = MenuManifest::parse(
            "[[items]]\nlabel = \"Products\"\n",
            std::path::Path::new("inline.toml"),
        )
        .unwrap();
        let (entries, report): (Vec<ResourceEntry>, LoadReport) = manifest.build_as(&container);

        // The bound factory supplied the icon, so the entry validates
        assert!(!report.has_errors());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].resource, "default");
        assert_eq!(entries[0].get_icon(), "heroicon-o-cube");
    }
}

mod evaluation_timing {
    use super::*;

    #[test]
    fn test_visibility_snapshot_vs_live_active_state() {
        let (container, invoker) = request(StaticGuard::guest(), "/admin/orders");
        let flag = Arc::new(AtomicBool::new(true));

        let visible_source = Arc::clone(&flag);
        let item = NavigationItem::make(&container, Some("Orders"))
            .visible(Deferred::lazy(move || visible_source.load(Ordering::SeqCst)))
            .is_active_when(|scope| scope.path().starts_with("/admin/orders"));

        flag.store(false, Ordering::SeqCst);
        invoker.set_path("/admin/customers");

        assert!(item.is_visible(), "visibility was decided when visible() ran");
        assert!(!item.is_active(), "active state follows the current request");
    }

    #[test]
    fn test_deferred_url_reflects_changes() {
        let (container, _) = request(StaticGuard::guest(), "/");
        let tenant = Arc::new(cell::Slot::new("acme"));

        let source = Arc::clone(&tenant);
        let item = NavigationItem::make(&container, Some("Billing")).url(
            Deferred::lazy(move || Some(format!("/{}/billing", source.get()))),
            false,
        );

        assert_eq!(item.get_url().as_deref(), Some("/acme/billing"));
        tenant.set("globex");
        assert_eq!(item.get_url().as_deref(), Some("/globex/billing"));
    }

    #[test]
    fn test_active_predicate_called_once_per_read() {
        let (container, _) = request(StaticGuard::guest(), "/");
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let item = NavigationItem::make(&container, Some("Home")).is_active_when(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        item.is_active();
        item.is_active();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_active_predicate_sees_principal() {
        let principal = Principal::new("ada").with_ability("manage-team");
        let (container, _) = request(StaticGuard::authenticated(principal), "/team");

        let item = NavigationItem::make(&container, Some("Team"))
            .is_active_when(|scope| scope.path() == "/team" && scope.allows("manage-team"));

        assert!(item.is_active());
    }

    /// Shared string the URL closure reads from
    mod cell {
        use std::sync::Mutex;

        pub struct Slot(Mutex<String>);

        impl Slot {
            pub fn new(value: &str) -> Self {
                Self(Mutex::new(value.to_string()))
            }

            pub fn get(&self) -> String {
                self.0.lock().unwrap().clone()
            }

            pub fn set(&self, value: &str) {
                *self.0.lock().unwrap() = value.to_string();
            }
        }
    }
}

mod manifest_files {
    use super::*;

    #[test]
    fn test_load_and_build_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        fs::write(
            &path,
            r#"
[[items]]
label = "Dashboard"
icon = "heroicon-o-home"
url = "/admin"
active_when = "^/admin$"

[[items]]
label = "Audit log"
icon = "heroicon-o-clipboard"
url = "/admin/audit"
visible_if_can = "view-audit"
"#,
        )
        .unwrap();

        let manifest = MenuManifest::load(&path).unwrap();
        assert_eq!(manifest.path, path);

        let (container, _) = request(StaticGuard::guest(), "/admin");
        let (items, report) = manifest.build(&container);

        assert_eq!(report.items_loaded, 2);
        let views: Vec<_> = items.iter().map(|item| item.to_view().unwrap()).collect();
        assert!(views[0].is_active);
        assert!(views[0].is_visible);
        assert!(!views[1].is_visible);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = MenuManifest::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, NavError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        fs::write(&path, "[[items]\nlabel = ").unwrap();

        let err = MenuManifest::load(&path).unwrap_err();
        assert!(matches!(err, NavError::ManifestParse { .. }));
        assert!(err.to_string().contains("menu.toml"));
    }

    #[test]
    fn test_view_serializes_for_renderers() {
        let (container, _) = request(StaticGuard::guest(), "/");
        let view = NavigationItem::make(&container, Some("Docs"))
            .icon("heroicon-o-book-open")
            .url("https://docs.example.com", true)
            .to_view()
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["label"], "Docs");
        assert_eq!(json["url"], "https://docs.example.com");
        assert_eq!(json["open_url_in_new_tab"], true);
        assert_eq!(json["sort"], -1);
    }
}
