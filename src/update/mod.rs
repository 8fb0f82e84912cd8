//! Update decision logic for requirement lines
//!
//! This module provides:
//! - Update filter configuration from CLI args
//! - Update decider that compares a pin against the registry's latest version

mod filter;

pub use filter::UpdateFilter;

use crate::domain::{LineKind, RequirementLine, SkipReason, UpdateResult, Version};
use crate::error::RegistryError;
use std::cmp::Ordering;

/// Decides whether a pinned line should move to the registry's latest version
pub struct UpdateDecider {
    /// Filter configuration
    filter: UpdateFilter,
}

impl UpdateDecider {
    /// Create a new UpdateDecider with the given filter
    pub fn new(filter: UpdateFilter) -> Self {
        Self { filter }
    }

    /// Check if a line should be looked up at all
    /// Returns Some(SkipReason) if it should be skipped, None if it should be processed
    pub fn should_skip(&self, line: &RequirementLine) -> Option<SkipReason> {
        if line.kind != LineKind::Pinned {
            return Some(SkipReason::NotPinned);
        }

        let name = line.name.as_deref().unwrap_or_default();
        if !self.filter.should_process_package(name) {
            if !self.filter.only.is_empty() {
                return Some(SkipReason::NotInOnlyList);
            } else {
                return Some(SkipReason::Excluded);
            }
        }

        None
    }

    /// Decide the outcome for a line given the lookup result for its package
    pub fn decide(
        &self,
        line: &RequirementLine,
        latest: Result<&str, &RegistryError>,
    ) -> UpdateResult {
        if let Some(reason) = self.should_skip(line) {
            return UpdateResult::skip(line.clone(), reason);
        }

        let latest = match latest {
            Ok(latest) => latest.trim(),
            Err(e) => return UpdateResult::skip(line.clone(), SkipReason::FetchFailed(e.to_string())),
        };

        let current_str = line.version.as_deref().unwrap_or_default();
        let current = match Version::parse(current_str) {
            Ok(v) => v,
            Err(_) => {
                return UpdateResult::skip(
                    line.clone(),
                    SkipReason::InvalidVersion(current_str.to_string()),
                )
            }
        };
        let candidate = match Version::parse(latest) {
            Ok(v) => v,
            Err(_) => {
                return UpdateResult::skip(line.clone(), SkipReason::InvalidVersion(latest.to_string()))
            }
        };

        // Only a strictly newer version replaces the pin; never downgrade
        match candidate.cmp(&current) {
            Ordering::Greater => UpdateResult::update(line.clone(), latest),
            Ordering::Equal => UpdateResult::skip(line.clone(), SkipReason::AlreadyLatest),
            Ordering::Less => UpdateResult::skip(line.clone(), SkipReason::AheadOfRegistry),
        }
    }
}

impl Default for UpdateDecider {
    fn default() -> Self {
        Self::new(UpdateFilter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    fn decide(raw: &str, latest: &str) -> UpdateResult {
        UpdateDecider::default().decide(&classify(raw), Ok(latest))
    }

    #[test]
    fn test_decide_simple_update() {
        let result = decide("Flask==1.0.0  # web framework", "2.0.1");
        assert!(result.changed());
        assert_eq!(result.render(), "Flask==2.0.1  # web framework");
    }

    #[test]
    fn test_decide_equal_version_unchanged() {
        let raw = "requests[security]==2.25.0; python_version>=\"3.6\"\n";
        let result = decide(raw, "2.25.0");
        assert!(!result.changed());
        assert_eq!(result.skip_reason(), Some(&SkipReason::AlreadyLatest));
        assert_eq!(result.render(), raw);
    }

    #[test]
    fn test_decide_equal_under_normalization() {
        let result = decide("pkg==1.0", "1.0.0");
        assert_eq!(result.skip_reason(), Some(&SkipReason::AlreadyLatest));
    }

    #[test]
    fn test_decide_range_never_updated() {
        let result = decide("numpy>=1.20", "2.0.0");
        assert!(!result.changed());
        assert_eq!(result.skip_reason(), Some(&SkipReason::NotPinned));
        assert_eq!(result.render(), "numpy>=1.20");
    }

    #[test]
    fn test_decide_non_pinned_kinds() {
        for raw in ["", "# comment", "-r base.txt", "requests", "foo bar"] {
            let result = decide(raw, "9.9.9");
            assert_eq!(result.skip_reason(), Some(&SkipReason::NotPinned));
            assert_eq!(result.render(), raw);
        }
    }

    #[test]
    fn test_decide_prevents_downgrade() {
        let result = decide("mockall==0.13.0", "0.9.1");
        assert!(!result.changed());
        assert_eq!(result.skip_reason(), Some(&SkipReason::AheadOfRegistry));
    }

    #[test]
    fn test_decide_multi_digit_comparison() {
        let result = decide("serde==1.9.0", "1.10.0");
        assert!(result.changed());
        assert_eq!(result.render(), "serde==1.10.0");
    }

    #[test]
    fn test_decide_final_after_prerelease() {
        assert!(decide("pkg==2.0rc1", "2.0").changed());
        assert!(!decide("pkg==2.0", "2.0rc1").changed());
        assert!(decide("pkg==2.0", "2.0.post1").changed());
    }

    #[test]
    fn test_decide_local_version_is_not_newer_than_next_release() {
        assert!(decide("torch==2.0.0+cu118", "2.0.1").changed());
        assert!(!decide("torch==2.0.0+cu118", "2.0.0").changed());
    }

    #[test]
    fn test_decide_fetch_error() {
        let line = classify("nonexistent-pkg==0.0.1");
        let error = RegistryError::package_not_found("nonexistent-pkg", "PyPI");
        let result = UpdateDecider::default().decide(&line, Err(&error));
        assert!(!result.changed());
        assert!(matches!(
            result.skip_reason(),
            Some(SkipReason::FetchFailed(msg)) if msg.contains("not found")
        ));
        assert_eq!(result.render(), "nonexistent-pkg==0.0.1");
    }

    #[test]
    fn test_decide_unparsable_latest() {
        let result = decide("pkg==1.0", "not a version");
        assert_eq!(
            result.skip_reason(),
            Some(&SkipReason::InvalidVersion("not a version".to_string()))
        );
    }

    #[test]
    fn test_decide_unparsable_current() {
        let result = decide("pkg==1.0-foo", "2.0");
        assert_eq!(
            result.skip_reason(),
            Some(&SkipReason::InvalidVersion("1.0-foo".to_string()))
        );
    }

    #[test]
    fn test_decide_exclude_and_only() {
        let decider =
            UpdateDecider::new(UpdateFilter::new().with_exclude(vec!["flask".to_string()]));
        let result = decider.decide(&classify("Flask==1.0.0"), Ok("2.0.1"));
        assert_eq!(result.skip_reason(), Some(&SkipReason::Excluded));

        let decider = UpdateDecider::new(UpdateFilter::new().with_only(vec!["numpy".to_string()]));
        let result = decider.decide(&classify("Flask==1.0.0"), Ok("2.0.1"));
        assert_eq!(result.skip_reason(), Some(&SkipReason::NotInOnlyList));
    }

    #[test]
    fn test_should_skip() {
        let decider = UpdateDecider::default();
        assert!(decider.should_skip(&classify("Flask==1.0.0")).is_none());
        assert_eq!(
            decider.should_skip(&classify("numpy>=1.20")),
            Some(SkipReason::NotPinned)
        );
    }

    #[test]
    fn test_decide_is_idempotent() {
        let first = decide("Flask==1.0.0\n", "2.0.1");
        let second = decide(&first.render(), "2.0.1");
        assert!(!second.changed());
        assert_eq!(second.render(), "Flask==2.0.1\n");
    }
}
