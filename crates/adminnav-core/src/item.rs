//! Navigation item builder
//!
//! A [`NavigationItem`] is one entry of an admin navigation menu. It is built
//! with chained setters and then read by a renderer.
//!
//! Evaluation timing differs per field:
//! - `visible` / `hidden` (and their `_if_can` forms) resolve their condition
//!   immediately and store a plain bool
//! - `url` and `is_active_when` keep the callback and re-run it on every read
//!
//! Host applications extend items by wrapping a `NavigationItem` in their own
//! type and implementing [`NavigationEntry`]; every setter and getter below
//! then works on the wrapper and returns the wrapper type.

use crate::container::{Container, Services};
use crate::deferred::Deferred;
use crate::error::NavError;
use crate::invoker::{CallScope, Predicate};
use adminnav_types::NavigationItemView;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Sort value reported for items without an explicit sort
pub const UNSORTED: i64 = -1;

/// One entry of an admin navigation menu
#[derive(Clone)]
pub struct NavigationItem {
    services: Services,
    label: Option<String>,
    group: Option<String>,
    icon: Option<String>,
    active_icon: Option<String>,
    icon_color: Option<String>,
    badge: Option<String>,
    badge_color: Option<String>,
    sort: Option<i64>,
    url: Deferred<Option<String>>,
    should_open_url_in_new_tab: bool,
    is_hidden: bool,
    is_visible: bool,
    is_active_when: Option<Predicate>,
}

impl NavigationItem {
    /// Create an item wired to `services`.
    ///
    /// Prefer [`Container::make`], which honours bindings for wrapper types.
    pub fn new(services: Services, label: Option<&str>) -> Self {
        let item = Self {
            services,
            label: None,
            group: None,
            icon: None,
            active_icon: None,
            icon_color: None,
            badge: None,
            badge_color: None,
            sort: None,
            url: Deferred::Value(None),
            should_open_url_in_new_tab: false,
            is_hidden: false,
            is_visible: true,
            is_active_when: None,
        };

        match label {
            Some(label) if is_filled(label) => item.label(label),
            _ => item,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }
}

impl fmt::Debug for NavigationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationItem")
            .field("label", &self.label)
            .field("group", &self.group)
            .field("icon", &self.icon)
            .field("active_icon", &self.active_icon)
            .field("icon_color", &self.icon_color)
            .field("badge", &self.badge)
            .field("badge_color", &self.badge_color)
            .field("sort", &self.sort)
            .field("url", &self.url)
            .field("should_open_url_in_new_tab", &self.should_open_url_in_new_tab)
            .field("is_hidden", &self.is_hidden)
            .field("is_visible", &self.is_visible)
            .field("is_active_when", &self.is_active_when.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Builder and accessor surface shared by every navigation entry type
///
/// Implementors only provide access to the wrapped [`NavigationItem`].
pub trait NavigationEntry: Sized + 'static {
    fn from_item(item: NavigationItem) -> Self;

    fn item(&self) -> &NavigationItem;

    fn item_mut(&mut self) -> &mut NavigationItem;

    /// Create an entry through `container`, so bindings for `Self` apply
    fn make(container: &Container, label: Option<&str>) -> Self {
        container.make::<Self>(label)
    }

    // ===================
    // Setters
    // ===================

    /// Set (or with `None`, clear) the badge text and its color together
    fn badge(mut self, badge: Option<&str>, color: Option<&str>) -> Self {
        let item = self.item_mut();
        item.badge = badge.map(str::to_string);
        item.badge_color = color.map(str::to_string);
        self
    }

    fn group(mut self, group: Option<&str>) -> Self {
        self.item_mut().group = group.map(str::to_string);
        self
    }

    fn icon(mut self, icon: impl Into<String>) -> Self {
        self.item_mut().icon = Some(icon.into());
        self
    }

    fn active_icon(mut self, active_icon: impl Into<String>) -> Self {
        self.item_mut().active_icon = Some(active_icon.into());
        self
    }

    fn icon_color(mut self, icon_color: Option<&str>) -> Self {
        self.item_mut().icon_color = icon_color.map(str::to_string);
        self
    }

    fn label(mut self, label: impl Into<String>) -> Self {
        self.item_mut().label = Some(label.into());
        self
    }

    fn open_url_in_new_tab(mut self, condition: bool) -> Self {
        self.item_mut().should_open_url_in_new_tab = condition;
        self
    }

    fn sort(mut self, sort: Option<i64>) -> Self {
        self.item_mut().sort = sort;
        self
    }

    /// Set the link target. Also overwrites the new-tab flag.
    fn url(mut self, url: impl Into<Deferred<Option<String>>>, open_in_new_tab: bool) -> Self {
        let item = self.item_mut();
        item.should_open_url_in_new_tab = open_in_new_tab;
        item.url = url.into();
        self
    }

    /// Show the item if `condition` holds, evaluated now
    fn visible(mut self, condition: impl Into<Deferred<bool>>) -> Self {
        self.item_mut().is_visible = condition.into().resolve();
        self
    }

    /// Show the item only if the current principal holds `ability`
    fn visible_if_can(self, ability: &str) -> Self {
        let condition = ability_check(self.item(), ability);
        self.visible(condition)
    }

    /// Hide the item if `condition` holds, evaluated now
    fn hidden(mut self, condition: impl Into<Deferred<bool>>) -> Self {
        self.item_mut().is_hidden = condition.into().resolve();
        self
    }

    /// Hide the item if the current principal holds `ability`
    fn hidden_if_can(self, ability: &str) -> Self {
        let condition = ability_check(self.item(), ability);
        self.hidden(condition)
    }

    /// Mark the item active whenever `callback` returns true.
    ///
    /// The callback runs through the container's invoker on every
    /// `is_active()` call.
    fn is_active_when<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CallScope<'_>) -> bool + Send + Sync + 'static,
    {
        self.item_mut().is_active_when = Some(Arc::new(callback));
        self
    }

    // ===================
    // Getters
    // ===================

    /// Label, or `""` if none was set
    fn get_label(&self) -> &str {
        self.item().label.as_deref().unwrap_or_default()
    }

    fn get_group(&self) -> Option<&str> {
        self.item().group.as_deref()
    }

    /// Icon, or `""` if none was set
    fn get_icon(&self) -> &str {
        self.item().icon.as_deref().unwrap_or_default()
    }

    fn get_active_icon(&self) -> Option<&str> {
        self.item().active_icon.as_deref()
    }

    fn get_icon_color(&self) -> Option<&str> {
        self.item().icon_color.as_deref()
    }

    fn get_badge(&self) -> Option<&str> {
        self.item().badge.as_deref()
    }

    fn get_badge_color(&self) -> Option<&str> {
        self.item().badge_color.as_deref()
    }

    /// Explicit sort, or [`UNSORTED`]
    fn get_sort(&self) -> i64 {
        self.item().sort.unwrap_or(UNSORTED)
    }

    /// Link target, re-resolved on every call
    fn get_url(&self) -> Option<String> {
        self.item().url.resolve()
    }

    fn should_open_url_in_new_tab(&self) -> bool {
        self.item().should_open_url_in_new_tab
    }

    /// Hidden flag wins over the visible flag
    fn is_hidden(&self) -> bool {
        let item = self.item();
        item.is_hidden || !item.is_visible
    }

    fn is_visible(&self) -> bool {
        !self.is_hidden()
    }

    /// Result of the active predicate, re-evaluated on every call
    fn is_active(&self) -> bool {
        let item = self.item();
        match &item.is_active_when {
            Some(predicate) => item.services.invoker.call(predicate),
            None => false,
        }
    }

    // ===================
    // Rendering handoff
    // ===================

    /// Check the fields a renderer cannot do without
    fn validate(&self) -> Result<(), NavError> {
        let item = self.item();
        let label = match item.label.as_deref() {
            Some(label) if is_filled(label) => label,
            _ => return Err(NavError::MissingLabel),
        };

        if !item.icon.as_deref().is_some_and(is_filled) {
            return Err(NavError::MissingIcon {
                label: label.to_string(),
            });
        }

        Ok(())
    }

    /// Validated snapshot with URL and active state resolved once
    fn to_view(&self) -> Result<NavigationItemView, NavError> {
        self.validate()?;

        let view = NavigationItemView {
            label: self.get_label().to_string(),
            group: self.get_group().map(str::to_string),
            icon: self.get_icon().to_string(),
            active_icon: self.get_active_icon().map(str::to_string),
            icon_color: self.get_icon_color().map(str::to_string),
            badge: self.get_badge().map(str::to_string),
            badge_color: self.get_badge_color().map(str::to_string),
            sort: self.get_sort(),
            url: self.get_url(),
            open_url_in_new_tab: self.should_open_url_in_new_tab(),
            is_active: self.is_active(),
            is_visible: self.is_visible(),
        };
        trace!(
            label = %view.label,
            active = view.is_active,
            visible = view.is_visible,
            "resolved navigation item"
        );

        Ok(view)
    }
}

impl NavigationEntry for NavigationItem {
    fn from_item(item: NavigationItem) -> Self {
        item
    }

    fn item(&self) -> &NavigationItem {
        self
    }

    fn item_mut(&mut self) -> &mut NavigationItem {
        self
    }
}

/// Non-blank after trimming whitespace
fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Deferred "does the current principal hold `ability`" check
fn ability_check(item: &NavigationItem, ability: &str) -> Deferred<bool> {
    let guard = Arc::clone(&item.services.guard);
    let ability = ability.to_string();
    Deferred::lazy(move || guard.allows(&ability))
}
