//! Helpers for the inspect and check commands
//!
//! Builds the guard from CLI flags, resolves items into views, and formats
//! tables and load reports.

use adminnav_core::{
    Container, ErrorSeverity, LoadError, LoadReport, MenuManifest, NavigationEntry,
    NavigationItem, NavigationItemView, Principal, StaticGuard,
};
use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Configuration
// ============================================================================

/// `<config dir>/adminnav/menu.toml`, if the platform has a config dir
pub fn default_manifest_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("adminnav").join("menu.toml"))
}

/// Guest unless a user id or at least one ability was given
pub fn build_guard(user: Option<String>, abilities: Vec<String>) -> StaticGuard {
    if user.is_none() && abilities.is_empty() {
        return StaticGuard::guest();
    }

    let principal = abilities.into_iter().fold(
        Principal::new(user.unwrap_or_else(|| "cli".to_string())),
        |principal, ability| principal.with_ability(ability),
    );
    StaticGuard::authenticated(principal)
}

// ============================================================================
// Resolution
// ============================================================================

/// Load and build the manifest at `path` for validation.
///
/// A manifest that cannot be read or parsed ends up in the report as a
/// fatal entry instead of an error.
pub fn check_manifest(path: &Path) -> LoadReport {
    let manifest = match MenuManifest::load(path) {
        Ok(manifest) => manifest,
        Err(err) => {
            let mut report = LoadReport::new();
            report.add_error(LoadError::from_nav_error("manifest", &err));
            return report;
        }
    };

    // Ability checks don't matter for validation
    let container = Container::with_guard(Arc::new(StaticGuard::guest()));
    let (_, report) = manifest.build(&container);
    report
}

/// Resolve items into views, dropping hidden ones unless `include_hidden`
pub fn resolve_views(
    items: &[NavigationItem],
    include_hidden: bool,
) -> Result<Vec<NavigationItemView>> {
    items
        .iter()
        .filter(|item| include_hidden || item.is_visible())
        .map(|item| {
            item.to_view()
                .with_context(|| format!("Cannot resolve '{}'", item.get_label()))
        })
        .collect()
}

// ============================================================================
// Formatting
// ============================================================================

pub fn format_item_table(views: &[NavigationItemView], no_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["Label", "Group", "Icon", "URL", "Sort", "Badge", "Active", "Visible"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    for view in views {
        let url = match (&view.url, view.open_url_in_new_tab) {
            (Some(url), true) => format!("{} ↗", url),
            (Some(url), false) => url.clone(),
            (None, _) => "-".to_string(),
        };
        let badge = match (&view.badge, &view.badge_color) {
            (Some(badge), Some(color)) => format!("{} ({})", badge, color),
            (Some(badge), None) => badge.clone(),
            (None, _) => "-".to_string(),
        };
        let sort = if view.sort < 0 {
            "-".to_string()
        } else {
            view.sort.to_string()
        };

        let mut active = Cell::new(yes_no(view.is_active));
        if view.is_active && !no_color {
            active = active.fg(Color::Green);
        }
        let mut visible = Cell::new(yes_no(view.is_visible));
        if !view.is_visible && !no_color {
            visible = visible.fg(Color::DarkGrey);
        }

        table.add_row(vec![
            Cell::new(&view.label),
            Cell::new(view.group.as_deref().unwrap_or("-")),
            Cell::new(view.display_icon()),
            Cell::new(url),
            Cell::new(sort),
            Cell::new(badge),
            active,
            visible,
        ]);
    }

    table.to_string()
}

/// One line per load error plus a summary line
pub fn format_report(report: &LoadReport) -> String {
    let mut out = String::new();

    for error in &report.errors {
        let level = match error.severity {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Fatal => "fatal",
        };
        let _ = writeln!(out, "{}: {}: {}", level, error.source, error.message);
        if let Some(suggestion) = &error.suggestion {
            let _ = writeln!(out, "  hint: {}", suggestion);
        }
    }

    let (warnings, errors, fatal) = report.error_count();
    let _ = writeln!(
        out,
        "{} loaded, {} skipped ({} warnings, {} errors, {} fatal)",
        report.items_loaded,
        report.items_skipped,
        warnings,
        errors,
        fatal
    );

    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
