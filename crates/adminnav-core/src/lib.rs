//! adminnav-core - Core library for adminnav
//!
//! Provides the navigation item builder, its authorization and invocation
//! collaborators, the container that creates items, and the menu manifest
//! loader.

pub mod auth;
pub mod container;
pub mod deferred;
pub mod error;
pub mod invoker;
pub mod item;
pub mod manifest;

pub use auth::{Authorizable, Guard, StaticGuard};
pub use container::{Container, Services};
pub use deferred::Deferred;
pub use error::{ErrorSeverity, LoadError, LoadReport, NavError};
pub use invoker::{CallScope, Invoker, Predicate, RequestInvoker};
pub use item::{NavigationEntry, NavigationItem, UNSORTED};
pub use manifest::{ItemDefinition, MenuManifest};

pub use adminnav_types::{NavigationItemView, Principal};
