//! Requirements file reading and writing
//!
//! This module provides:
//! - Reading with a distinct not-found error
//! - Atomic writes: content goes to a temporary file in the same directory
//!   which then replaces the target, so a failed write leaves the target intact

use crate::error::ManifestError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a requirements file
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::not_found(path),
        _ => ManifestError::read_error(path, e),
    })
}

/// Replace a requirements file's content atomically
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ManifestError::write_error(path, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ManifestError::write_error(path, e))?;

    // Keep the target's permissions
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| ManifestError::write_error(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| ManifestError::write_error(path, e.error))?;
    Ok(())
}
