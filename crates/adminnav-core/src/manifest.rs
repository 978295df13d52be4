//! Menu manifest loader
//!
//! A manifest is a TOML file with one `[[items]]` table per navigation entry:
//!
//! ```toml
//! [[items]]
//! label = "Users"
//! icon = "heroicon-o-users"
//! group = "Access"
//! sort = 2
//! url = "/admin/users"
//! visible_if_can = "view-users"
//! active_when = "^/admin/users"
//! ```
//!
//! Building a manifest never fails as a whole: broken entries are skipped and
//! recorded in a [`LoadReport`].

use crate::container::Container;
use crate::error::{LoadError, LoadReport, NavError};
use crate::invoker::CallScope;
use crate::item::{NavigationEntry, NavigationItem};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parsed menu manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuManifest {
    /// Source file, empty for manifests parsed from memory
    #[serde(skip)]
    pub path: PathBuf,

    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

/// One `[[items]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDefinition {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub active_icon: Option<String>,
    pub icon_color: Option<String>,
    pub group: Option<String>,
    pub badge: Option<String>,
    pub badge_color: Option<String>,
    pub sort: Option<i64>,
    pub url: Option<String>,
    #[serde(default)]
    pub open_in_new_tab: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Ability the principal needs for the entry to be shown
    pub visible_if_can: Option<String>,
    /// Ability that hides the entry when held
    pub hidden_if_can: Option<String>,
    /// Regex matched against the current request path
    pub active_when: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl MenuManifest {
    /// Parse manifest content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, NavError> {
        let mut manifest: MenuManifest =
            toml::from_str(content).map_err(|source| NavError::ManifestParse {
                path: path.to_path_buf(),
                message: source.message().to_string(),
                source,
            })?;
        manifest.path = path.to_path_buf();
        Ok(manifest)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, NavError> {
        if !path.exists() {
            return Err(NavError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| NavError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = Self::parse(&content, path)?;
        debug!(path = %path.display(), items = manifest.items.len(), "loaded menu manifest");
        Ok(manifest)
    }

    /// Build plain navigation items
    pub fn build(&self, container: &Container) -> (Vec<NavigationItem>, LoadReport) {
        self.build_as(container)
    }

    /// Build entries of type `T` through `container`, skipping broken ones
    pub fn build_as<T: NavigationEntry>(&self, container: &Container) -> (Vec<T>, LoadReport) {
        let mut report = LoadReport::new();
        let mut entries = Vec::with_capacity(self.items.len());

        for (index, definition) in self.items.iter().enumerate() {
            let source = format!("items[{}]", index);
            match definition.build::<T>(container, &source, &mut report) {
                Some(entry) => entries.push(entry),
                None => report.items_skipped += 1,
            }
        }

        report.items_loaded = entries.len();
        debug!(
            loaded = report.items_loaded,
            skipped = report.items_skipped,
            "built navigation items from manifest"
        );
        (entries, report)
    }
}

impl ItemDefinition {
    /// Build one entry, recording problems under `source`.
    ///
    /// Returns `None` when the entry lacks a label or icon.
    pub fn build<T: NavigationEntry>(
        &self,
        container: &Container,
        source: &str,
        report: &mut LoadReport,
    ) -> Option<T> {
        let entry: T = container.make(self.label.as_deref());
        let entry = match &self.icon {
            Some(icon) => entry.icon(icon.as_str()),
            None => entry,
        };

        if let Err(err) = entry.validate() {
            warn!(source, error = %err, "skipping navigation entry");
            report.add_error(LoadError::from_nav_error(source, &err));
            return None;
        }

        let mut entry = entry
            .group(self.group.as_deref())
            .icon_color(self.icon_color.as_deref())
            .badge(self.badge.as_deref(), self.badge_color.as_deref())
            .sort(self.sort);

        if let Some(active_icon) = &self.active_icon {
            entry = entry.active_icon(active_icon.as_str());
        }
        if let Some(url) = &self.url {
            entry = entry.url(url.as_str(), self.open_in_new_tab);
        } else if self.open_in_new_tab {
            entry = entry.open_url_in_new_tab(true);
        }

        // An explicit `visible = false` / `hidden = true` wins over ability checks
        entry = match (&self.visible_if_can, self.visible) {
            (Some(ability), true) => entry.visible_if_can(ability),
            _ => entry.visible(self.visible),
        };
        entry = match (&self.hidden_if_can, self.hidden) {
            (Some(ability), false) => entry.hidden_if_can(ability),
            _ => entry.hidden(self.hidden),
        };

        if let Some(pattern) = &self.active_when {
            match Regex::new(pattern) {
                Ok(regex) => {
                    entry = entry.is_active_when(move |scope: &CallScope<'_>| {
                        regex.is_match(scope.path())
                    });
                }
                Err(source_err) => {
                    let err = NavError::InvalidPattern {
                        label: entry.get_label().to_string(),
                        pattern: pattern.clone(),
                        source: source_err,
                    };
                    warn!(source, error = %err, "ignoring active_when pattern");
                    report.add_error(LoadError::from_nav_error(source, &err));
                }
            }
        }

        Some(entry)
    }
}
