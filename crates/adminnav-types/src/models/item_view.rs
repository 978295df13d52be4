use serde::{Deserialize, Serialize};

/// Resolved snapshot of a navigation item, ready for a renderer.
///
/// Every deferred value (URL, active state) has already been evaluated once
/// when the view was produced. Re-resolve the source item to observe changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItemView {
    /// Display text
    pub label: String,
    /// Logical grouping key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Icon identifier
    pub icon: String,
    /// Icon shown while the item is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_color: Option<String>,
    /// Ordering hint, `-1` when the item carries no explicit sort
    pub sort: i64,
    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub open_url_in_new_tab: bool,
    pub is_active: bool,
    pub is_visible: bool,
}

impl NavigationItemView {
    /// Icon to display given the resolved active state
    ///
    /// Falls back to `icon` when the item is active but has no `active_icon`.
    pub fn display_icon(&self) -> &str {
        match (&self.active_icon, self.is_active) {
            (Some(active), true) => active,
            _ => &self.icon,
        }
    }
}
