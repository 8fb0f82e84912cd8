//! Update decision result types

use super::RequirementLine;
use crate::parser::reserialize;
use serde::Serialize;
use std::fmt;

/// Reason why a line was left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Line is not an exact `==` pin
    NotPinned,
    /// Pinned version equals the latest version
    AlreadyLatest,
    /// Pinned version is newer than the latest version (no downgrade)
    AheadOfRegistry,
    /// Package was excluded via --exclude flag
    Excluded,
    /// Package not in --only list
    NotInOnlyList,
    /// Failed to fetch version info from registry
    FetchFailed(String),
    /// Pinned or latest version is not a valid version
    InvalidVersion(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotPinned => write!(f, "not pinned"),
            SkipReason::AlreadyLatest => write!(f, "already at latest"),
            SkipReason::AheadOfRegistry => write!(f, "newer than registry"),
            SkipReason::Excluded => write!(f, "excluded by --exclude"),
            SkipReason::NotInOnlyList => write!(f, "not in --only list"),
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::InvalidVersion(version) => write!(f, "invalid version '{}'", version),
        }
    }
}

/// Result of an update decision for a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateResult {
    /// Version token will be replaced
    Update {
        /// The line being updated
        line: RequirementLine,
        /// The new version to pin
        new_version: String,
    },
    /// Line is left as-is
    Skip {
        /// The line that was skipped
        line: RequirementLine,
        /// The reason for skipping
        reason: SkipReason,
    },
}

impl UpdateResult {
    /// Creates an Update result
    pub fn update(line: RequirementLine, new_version: impl Into<String>) -> Self {
        UpdateResult::Update {
            line,
            new_version: new_version.into(),
        }
    }

    /// Creates a Skip result
    pub fn skip(line: RequirementLine, reason: SkipReason) -> Self {
        UpdateResult::Skip { line, reason }
    }

    /// Returns true if the line changes
    pub fn changed(&self) -> bool {
        matches!(self, UpdateResult::Update { .. })
    }

    /// Returns the line reference
    pub fn line(&self) -> &RequirementLine {
        match self {
            UpdateResult::Update { line, .. } => line,
            UpdateResult::Skip { line, .. } => line,
        }
    }

    /// Returns the skip reason, if skipped
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            UpdateResult::Update { .. } => None,
            UpdateResult::Skip { reason, .. } => Some(reason),
        }
    }

    /// The line as it will be written back
    pub fn render(&self) -> String {
        match self {
            UpdateResult::Update { line, new_version } => reserialize(line, Some(new_version)),
            UpdateResult::Skip { line, .. } => reserialize(line, None),
        }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line();
        let name = line.name.as_deref().unwrap_or("<line>");
        match self {
            UpdateResult::Update { new_version, .. } => write!(
                f,
                "{}: {} → {}",
                name,
                line.version.as_deref().unwrap_or("?"),
                new_version
            ),
            UpdateResult::Skip { reason, .. } => write!(f, "{}: skipped ({})", name, reason),
        }
    }
}

/// Non-fatal problem reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateWarning {
    /// Line does not follow the requirement grammar
    MalformedLine { line_number: usize, text: String },
    /// Registry lookup failed for a package
    LookupFailure { package: String, message: String },
    /// A version on either side of the comparison is not valid
    UnparsableVersion {
        line_number: usize,
        package: String,
        version: String,
    },
}

impl fmt::Display for UpdateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateWarning::MalformedLine { line_number, text } => {
                write!(f, "line {}: could not parse '{}', left unchanged", line_number, text)
            }
            UpdateWarning::LookupFailure { package, message } => {
                write!(f, "could not fetch latest version for {}: {}", package, message)
            }
            UpdateWarning::UnparsableVersion {
                line_number,
                package,
                version,
            } => write!(
                f,
                "line {}: invalid version '{}' for {}, left unchanged",
                line_number, version, package
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    fn pinned_line() -> RequirementLine {
        classify("Flask==1.0.0  # web framework\n")
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NotPinned.to_string(), "not pinned");
        assert_eq!(SkipReason::AlreadyLatest.to_string(), "already at latest");
        assert_eq!(SkipReason::AheadOfRegistry.to_string(), "newer than registry");
        assert_eq!(
            SkipReason::FetchFailed("timeout".to_string()).to_string(),
            "fetch failed: timeout"
        );
        assert_eq!(
            SkipReason::InvalidVersion("x".to_string()).to_string(),
            "invalid version 'x'"
        );
    }

    #[test]
    fn test_update_result_update() {
        let result = UpdateResult::update(pinned_line(), "2.0.1");
        assert!(result.changed());
        assert!(result.skip_reason().is_none());
        assert_eq!(result.render(), "Flask==2.0.1  # web framework\n");
        assert_eq!(result.to_string(), "Flask: 1.0.0 → 2.0.1");
    }

    #[test]
    fn test_update_result_skip() {
        let result = UpdateResult::skip(pinned_line(), SkipReason::AlreadyLatest);
        assert!(!result.changed());
        assert_eq!(result.skip_reason(), Some(&SkipReason::AlreadyLatest));
        assert_eq!(result.render(), "Flask==1.0.0  # web framework\n");
        assert_eq!(result.to_string(), "Flask: skipped (already at latest)");
    }

    #[test]
    fn test_warning_display() {
        let warning = UpdateWarning::LookupFailure {
            package: "nonexistent-pkg".to_string(),
            message: "package 'nonexistent-pkg' not found in PyPI registry".to_string(),
        };
        assert!(warning
            .to_string()
            .starts_with("could not fetch latest version for nonexistent-pkg"));

        let warning = UpdateWarning::MalformedLine {
            line_number: 3,
            text: "foo bar".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "line 3: could not parse 'foo bar', left unchanged"
        );
    }

    #[test]
    fn test_serde_update_result() {
        let result = UpdateResult::update(pinned_line(), "2.0.1");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"type\":\"update\""));
        assert!(json.contains("\"new_version\":\"2.0.1\""));
        assert!(!json.contains("version_span"));
    }
}
