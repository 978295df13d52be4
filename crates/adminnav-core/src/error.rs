//! Error types for adminnav-core
//!
//! Building and reading navigation items never fails. Errors only come from
//! validating an item for a renderer and from loading menu manifests, where a
//! `LoadReport` collects per-entry failures for graceful degradation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for adminnav operations
#[derive(Error, Debug)]
pub enum NavError {
    // ===================
    // Item Errors
    // ===================
    #[error("Navigation item has no label")]
    MissingLabel,

    #[error("Navigation item '{label}' has no icon")]
    MissingIcon { label: String },

    // ===================
    // Manifest Errors
    // ===================
    #[error("Failed to read manifest: {path}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid active_when pattern '{pattern}' for '{label}'")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Severity level for errors during manifest load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Entry loaded with degraded behavior
    Warning,
    /// Entry skipped
    Error,
    /// Manifest unusable
    Fatal,
}

/// Individual error entry in a load report
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Where the error came from (e.g. "items[2]", "manifest")
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Error,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from NavError with context-aware suggestions
    pub fn from_nav_error(source: impl Into<String>, error: &NavError) -> Self {
        let source = source.into();
        let (severity, suggestion) = match error {
            NavError::MissingLabel => (
                ErrorSeverity::Error,
                Some("Add a `label = \"...\"` line to the entry".to_string()),
            ),
            NavError::MissingIcon { .. } => (
                ErrorSeverity::Error,
                Some("Add an `icon = \"...\"` line to the entry".to_string()),
            ),
            NavError::InvalidPattern { .. } => (
                ErrorSeverity::Warning,
                Some("Check the regex syntax of `active_when`".to_string()),
            ),
            NavError::ManifestNotFound { path } => (
                ErrorSeverity::Fatal,
                Some(format!("Create the manifest: touch {}", path.display())),
            ),
            NavError::ManifestRead { path, .. } => (
                ErrorSeverity::Fatal,
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            NavError::ManifestParse { .. } => (
                ErrorSeverity::Fatal,
                Some("Validate TOML syntax of the manifest".to_string()),
            ),
        };

        Self {
            source,
            message: error.to_string(),
            severity,
            suggestion,
        }
    }
}

/// Report of errors encountered while building a menu from a manifest
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub items_loaded: usize,
    pub items_skipped: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    /// Returns true if there are any fatal errors
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if any entry was skipped or the manifest was unusable
    pub fn has_blocking_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity != ErrorSeverity::Warning)
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns only warnings
    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Returns count by severity: (warnings, errors, fatal)
    pub fn error_count(&self) -> (usize, usize, usize) {
        self.errors
            .iter()
            .fold((0, 0, 0), |(w, e, f), err| match err.severity {
                ErrorSeverity::Warning => (w + 1, e, f),
                ErrorSeverity::Error => (w, e + 1, f),
                ErrorSeverity::Fatal => (w, e, f + 1),
            })
    }
}
