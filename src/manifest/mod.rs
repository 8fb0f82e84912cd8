//! Requirements file handling
//!
//! This module provides:
//! - RequirementsFile: file content split into classified lines
//! - Atomic write-back of updated content

mod writer;

pub use writer::{read_manifest, write_manifest};

use crate::domain::RequirementLine;
use crate::error::ManifestError;
use crate::parser::classify_all;
use std::path::{Path, PathBuf};

/// A requirements file read into classified lines
#[derive(Debug, Clone)]
pub struct RequirementsFile {
    /// Path the file was read from
    pub path: PathBuf,
    /// Lines in file order
    pub lines: Vec<RequirementLine>,
}

impl RequirementsFile {
    /// Read and classify a requirements file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = read_manifest(path)?;
        Ok(Self::from_content(path, &content))
    }

    /// Classify already loaded content
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: classify_all(content),
        }
    }

    /// Distinct lookup keys of all pinned lines, in first-seen order
    pub fn pinned_packages(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for line in self.lines.iter().filter(|l| l.is_pinned()) {
            if let Some(name) = line.normalized_name() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Replace the file's content atomically
    pub fn write(&self, content: &str) -> Result<(), ManifestError> {
        write_manifest(&self.path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_content() {
        let file = RequirementsFile::from_content(
            "requirements.txt",
            "# web\nFlask==1.0.0\r\nnumpy>=1.20\n\n-r dev.txt",
        );
        let kinds: Vec<LineKind> = file.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Comment,
                LineKind::Pinned,
                LineKind::OtherSpecifier,
                LineKind::Blank,
                LineKind::Directive,
            ]
        );
    }

    #[test]
    fn test_pinned_packages_are_distinct() {
        let file = RequirementsFile::from_content(
            "requirements.txt",
            "Flask==1.0.0\nflask==1.0.0; python_version<\"3\"\nzope.interface==5.0\nnumpy>=1.20\n",
        );
        assert_eq!(file.pinned_packages(), vec!["flask", "zope-interface"]);
    }

    #[test]
    fn test_read_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requirements.txt");
        fs::write(&path, "Flask==1.0.0\n").unwrap();

        let file = RequirementsFile::read(&path).unwrap();
        assert_eq!(file.lines.len(), 1);

        file.write("Flask==2.0.1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Flask==2.0.1\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = RequirementsFile::read("/nonexistent/requirements.txt");
        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }
}
