//! Core domain models for requp
//!
//! This module contains the fundamental types used throughout the application:
//! - Requirement lines and their classification
//! - PEP 440 versions and ordering
//! - Update decision results and warnings
//! - Per-file summary structures

mod requirement;
mod summary;
mod update_result;
mod version;

pub use requirement::{normalize_name, LineEnding, LineKind, RequirementLine};
pub use summary::{FileUpdateResult, LineResult};
pub use update_result::{SkipReason, UpdateResult, UpdateWarning};
pub use version::{compare_versions, LocalSegment, PreRelease, Version};
