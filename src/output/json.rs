//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the changes made to a requirements file
//! - Warnings included in the document instead of on stderr

use crate::domain::{FileUpdateResult, UpdateResult};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Requirements file path
    file: String,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Whether the file was rewritten
    written: bool,
    /// Number of changed lines
    updated: usize,
    /// Changed lines in file order
    changes: Vec<JsonChange>,
    /// Warning messages
    warnings: Vec<String>,
}

/// JSON representation of a changed line
#[derive(Serialize)]
struct JsonChange {
    /// 1-based line number
    line: usize,
    /// Package name as written in the file
    name: String,
    /// Old version
    from: String,
    /// New version
    to: String,
}

impl JsonFormatter {
    fn to_json(result: &FileUpdateResult) -> JsonOutput {
        let changes = result
            .changes()
            .filter_map(|change| match &change.result {
                UpdateResult::Update { line, new_version } => Some(JsonChange {
                    line: change.line_number,
                    name: line.name.clone().unwrap_or_default(),
                    from: line.version.clone().unwrap_or_default(),
                    to: new_version.clone(),
                }),
                UpdateResult::Skip { .. } => None,
            })
            .collect();

        JsonOutput {
            file: result.path.display().to_string(),
            dry_run: result.dry_run,
            written: result.written,
            updated: result.updated_lines(),
            changes,
            warnings: result.warning_messages(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &FileUpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = Self::to_json(result);
        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }

    fn includes_warnings(&self) -> bool {
        true
    }
}
