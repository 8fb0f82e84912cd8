//! Update result summary types

use super::{LineEnding, UpdateResult, UpdateWarning};
use serde::Serialize;
use std::path::PathBuf;

/// Decision for one line, tagged with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineResult {
    /// 1-based line number in the file
    pub line_number: usize,
    /// The decision for this line
    pub result: UpdateResult,
}

impl LineResult {
    /// Line content before the update, without its line ending
    pub fn old_text(&self) -> &str {
        self.result.line().content()
    }

    /// Line content after the update, without its line ending
    pub fn new_text(&self) -> String {
        let rendered = self.result.render();
        LineEnding::split(&rendered).0.to_string()
    }
}

/// Update result for a single requirements file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpdateResult {
    /// Path to the requirements file
    pub path: PathBuf,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Decisions for every line, in file order
    pub results: Vec<LineResult>,
    /// Non-fatal problems, in the order they were found
    pub warnings: Vec<UpdateWarning>,
    /// Whether the file was actually rewritten
    pub written: bool,
}

impl FileUpdateResult {
    /// Creates a new FileUpdateResult
    pub fn new(path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            path: path.into(),
            dry_run,
            results: Vec::new(),
            warnings: Vec::new(),
            written: false,
        }
    }

    /// Adds a line result
    pub fn add_result(&mut self, line_number: usize, result: UpdateResult) {
        self.results.push(LineResult {
            line_number,
            result,
        });
    }

    /// Adds a warning
    pub fn add_warning(&mut self, warning: UpdateWarning) {
        self.warnings.push(warning);
    }

    /// Warnings as one-line messages
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }

    /// Returns the number of changed lines
    pub fn updated_lines(&self) -> usize {
        self.changes().count()
    }

    /// Returns all changed lines
    pub fn changes(&self) -> impl Iterator<Item = &LineResult> {
        self.results.iter().filter(|r| r.result.changed())
    }

    /// Returns true if any line changes
    pub fn has_updates(&self) -> bool {
        self.changes().next().is_some()
    }

    /// Returns true if any warnings were recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The full file content after applying the decisions
    pub fn rendered(&self) -> String {
        self.results.iter().map(|r| r.result.render()).collect()
    }
}
