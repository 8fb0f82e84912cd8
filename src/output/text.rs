//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Dry-run change listing (`line N: old -> new`)
//! - One-line summary after a write
//! - Skipped package display with reasons in verbose mode

use crate::domain::{FileUpdateResult, LineKind, UpdateResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Write `  line N: old -> new` for every change
    fn format_changes(
        &self,
        result: &FileUpdateResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for change in result.changes() {
            let old = change.old_text();
            let new = change.new_text();
            if self.color {
                writeln!(
                    writer,
                    "  line {}: {} {} {}",
                    change.line_number,
                    old.dimmed(),
                    "->".dimmed(),
                    new.bright_white().bold()
                )?;
            } else {
                writeln!(writer, "  line {}: {} -> {}", change.line_number, old, new)?;
            }
        }
        Ok(())
    }

    /// Write the skip reason of every requirement line that stays as-is
    fn format_skips(&self, result: &FileUpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let skipped: Vec<&UpdateResult> = result
            .results
            .iter()
            .map(|r| &r.result)
            .filter(|r| !r.changed() && r.line().name.is_some())
            .collect();
        if skipped.is_empty() {
            return Ok(());
        }

        let max_name_len = skipped
            .iter()
            .filter_map(|r| r.line().name.as_ref().map(|n| n.len()))
            .max()
            .unwrap_or(0);

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Unchanged:".dimmed())?;
        } else {
            writeln!(writer, "Unchanged:")?;
        }
        for r in skipped {
            let line = r.line();
            let name = line.name.as_deref().unwrap_or_default();
            let spec = match line.kind {
                LineKind::Pinned => format!("=={}", line.version.as_deref().unwrap_or_default()),
                _ => String::new(),
            };
            let reason = r.skip_reason().map(|s| s.to_string()).unwrap_or_default();
            if self.color {
                writeln!(
                    writer,
                    "  {:width$}{} {}",
                    name,
                    spec.dimmed(),
                    format!("({})", reason).dimmed(),
                    width = max_name_len
                )?;
            } else {
                writeln!(
                    writer,
                    "  {:width$}{} ({})",
                    name,
                    spec,
                    reason,
                    width = max_name_len
                )?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &FileUpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let count = result.updated_lines();

        if count == 0 {
            writeln!(writer, "No updates needed.")?;
        } else if result.dry_run {
            if self.verbosity == Verbosity::Quiet {
                writeln!(writer, "{} packages would be updated.", count)?;
            } else {
                writeln!(writer, "Would make the following changes:")?;
                self.format_changes(result, writer)?;
            }
        } else {
            if self.verbosity == Verbosity::Verbose {
                self.format_changes(result, writer)?;
            }
            let summary = format!(
                "Updated '{}': {} packages updated.",
                result.path.display(),
                count
            );
            if self.color {
                writeln!(writer, "{}", summary.green())?;
            } else {
                writeln!(writer, "{}", summary)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_skips(result, writer)?;
        }

        Ok(())
    }
}
