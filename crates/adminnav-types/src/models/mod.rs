//! Data models shared between the core library and its consumers

pub mod item_view;
pub mod principal;

pub use item_view::NavigationItemView;
pub use principal::Principal;
