//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff style display, one hunk per changed line
//! - Before/after line comparison

use crate::domain::FileUpdateResult;
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

/// Diff formatter for showing line changes
pub struct DiffFormatter {
    /// Whether to use colors
    color: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Summary line after the hunks
    fn summary(&self, result: &FileUpdateResult) -> String {
        let count = result.updated_lines();
        if count == 0 {
            "No updates needed.".to_string()
        } else if result.dry_run {
            format!("{} packages would be updated (dry-run).", count)
        } else {
            format!("{} packages updated.", count)
        }
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, result: &FileUpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.has_updates() {
            let path = result.path.display();
            if self.color {
                writeln!(writer, "{}", format!("--- a/{}", path).bold())?;
                writeln!(writer, "{}", format!("+++ b/{}", path).bold())?;
            } else {
                writeln!(writer, "--- a/{}", path)?;
                writeln!(writer, "+++ b/{}", path)?;
            }

            for change in result.changes() {
                let hunk = format!("@@ line {} @@", change.line_number);
                let old = format!("-{}", change.old_text());
                let new = format!("+{}", change.new_text());
                if self.color {
                    writeln!(writer, "{}", hunk.cyan())?;
                    writeln!(writer, "{}", old.red())?;
                    writeln!(writer, "{}", new.green())?;
                } else {
                    writeln!(writer, "{}", hunk)?;
                    writeln!(writer, "{}", old)?;
                    writeln!(writer, "{}", new)?;
                }
            }
            writeln!(writer)?;
        }

        writeln!(writer, "{}", self.summary(result))
    }
}
