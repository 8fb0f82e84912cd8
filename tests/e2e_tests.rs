//! End-to-end tests for the requp CLI
//!
//! These tests verify:
//! - Exit codes for success, fatal errors and invalid options
//! - Files without pins are never rewritten
//! - Index failures are warnings, not errors
//!
//! Nothing here needs network access: lookups go to a closed local port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Index URL nobody listens on
const UNREACHABLE_INDEX: &str = "http://127.0.0.1:9/pypi";

fn requp() -> Command {
    Command::new(env!("CARGO_BIN_EXE_requp"))
}

/// Create a temp dir holding a requirements file with the given content
fn create_requirements(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("requirements.txt");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Run against the unreachable index with fast failure settings
fn requp_offline(path: &Path) -> Command {
    let mut cmd = requp();
    cmd.arg(path)
        .args(["--index-url", UNREACHABLE_INDEX])
        .args(["--retries", "0", "--timeout", "2", "--quiet"]);
    cmd
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        requp()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--dry-run"))
            .stdout(predicate::str::contains("--index-url"));
    }

    #[test]
    fn test_exit_code_version() {
        requp()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_exit_code_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        requp()
            .arg(temp_dir.path().join("requirements.txt"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error: requirements file not found"));
    }

    #[test]
    fn test_exit_code_invalid_concurrency() {
        let (_dir, path) = create_requirements("Flask==1.0.0\n");
        requp()
            .arg(&path)
            .args(["--concurrency", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid concurrency"));
    }

    #[test]
    fn test_exit_code_invalid_index_url() {
        let (_dir, path) = create_requirements("Flask==1.0.0\n");
        requp()
            .arg(&path)
            .args(["--index-url", "ftp://mirror.example.com"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid index URL"));
    }

    #[test]
    fn test_exit_code_json_with_diff() {
        let (_dir, path) = create_requirements("Flask==1.0.0\n");
        requp()
            .arg(&path)
            .args(["--json", "--diff"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("conflicting options"));
    }
}

mod unpinned_file_tests {
    use super::*;

    const CONTENT: &str = "# tools\r\nnumpy>=1.20\r\n-r base.txt\r\n\r\nrequests~=2.31";

    #[test]
    fn test_no_updates_needed() {
        let (_dir, path) = create_requirements(CONTENT);
        requp_offline(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("No updates needed."))
            .stderr(predicate::str::contains("warning").not());

        assert_eq!(fs::read_to_string(&path).unwrap(), CONTENT);
    }

    #[test]
    fn test_malformed_line_warns() {
        let (_dir, path) = create_requirements("foo bar\nnumpy>=1.20\n");
        requp_offline(&path)
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "warning: line 1: could not parse 'foo bar'",
            ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "foo bar\nnumpy>=1.20\n");
    }
}

mod lookup_failure_tests {
    use super::*;

    #[test]
    fn test_unreachable_index_is_a_warning() {
        let (_dir, path) = create_requirements("Flask==1.0.0  # web framework\n");
        requp_offline(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("No updates needed."))
            .stderr(predicate::str::contains(
                "warning: could not fetch latest version for Flask",
            ));

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Flask==1.0.0  # web framework\n"
        );
    }

    #[test]
    fn test_json_output_schema() {
        let (_dir, path) = create_requirements("Flask==1.0.0\nDjango==3.0\n");
        let output = requp_offline(&path)
            .arg("--json")
            .output()
            .expect("Failed to run requp");
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["file"], path.display().to_string());
        assert_eq!(json["dry_run"], false);
        assert_eq!(json["written"], false);
        assert_eq!(json["updated"], 0);
        assert!(json["changes"].as_array().unwrap().is_empty());
        assert_eq!(json["warnings"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_dry_run_diff_mode() {
        let (_dir, path) = create_requirements("Flask==1.0.0\n");
        requp_offline(&path)
            .args(["--dry-run", "--diff"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No updates needed."))
            .stdout(predicate::str::contains("---").not());
    }
}
