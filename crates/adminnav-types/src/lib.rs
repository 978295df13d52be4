//! adminnav-types - Shared data types for adminnav
//!
//! This crate contains pure data structures without heavy dependencies.
//! Just serde-serializable types.
//!
//! Used by:
//! - adminnav-core (navigation items, manifest loading)
//! - adminnav (CLI output)
//! - renderers consuming resolved navigation items

pub mod models;

pub use models::{NavigationItemView, Principal};
