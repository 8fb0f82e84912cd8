//! Update filter configuration
//!
//! This module provides the UpdateFilter struct that encapsulates
//! the package filter options for update decisions.

use crate::domain::normalize_name;

/// Filter configuration for update decisions
///
/// Names are compared in PEP 503 normalized form, so `--only Flask`
/// matches a `flask==...` line.
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// Packages to exclude from updates
    pub exclude: Vec<String>,
    /// If non-empty, only update these packages
    pub only: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter with default settings (process all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude.iter().map(|n| normalize_name(n)).collect();
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only.iter().map(|n| normalize_name(n)).collect();
        self
    }

    /// Check if a package should be processed based on filters
    pub fn should_process_package(&self, name: &str) -> bool {
        let name = normalize_name(name);
        // If --only is specified, only process those packages
        if !self.only.is_empty() {
            return self.only.contains(&name);
        }
        !self.exclude.contains(&name)
    }
}
