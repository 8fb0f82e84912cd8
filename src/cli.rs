//! CLI argument parsing module for requp

use crate::error::ConfigError;
use crate::orchestrator::{OrchestratorConfig, DEFAULT_CONCURRENCY};
use crate::registry::{MAX_RETRIES, PYPI_API_URL};
use crate::update::UpdateFilter;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout given in whole seconds
fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Update pinned packages in a requirements file to their latest releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "requp",
    version,
    about = "Update pinned packages in a requirements file to their latest releases"
)]
pub struct CliArgs {
    /// Requirements file to update
    #[arg(default_value = "requirements.txt")]
    pub file: PathBuf,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Package filters
    /// Exclude specific packages from update (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Update only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    // Index options
    /// Base URL of a PyPI-compatible JSON API
    #[arg(long, default_value = PYPI_API_URL)]
    pub index_url: String,

    /// Number of packages looked up in parallel
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Retries on network errors and rate limiting
    #[arg(long, default_value_t = MAX_RETRIES)]
    pub retries: u32,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Check option combinations that clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: self.concurrency,
            });
        }

        let url = self.index_url.trim();
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .is_some_and(|rest| !rest.trim_matches('/').is_empty());
        if !has_host {
            return Err(ConfigError::InvalidIndexUrl {
                value: self.index_url.clone(),
            });
        }

        if self.json && self.diff {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --diff cannot be used together".to_string(),
            });
        }

        Ok(())
    }

    /// Build the package filter from --exclude and --only
    pub fn filter(&self) -> UpdateFilter {
        let mut filter = UpdateFilter::new();
        if !self.exclude.is_empty() {
            filter = filter.with_exclude(self.exclude.clone());
        }
        if !self.only.is_empty() {
            filter = filter.with_only(self.only.clone());
        }
        filter
    }

    /// Build the orchestrator configuration
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            concurrency: self.concurrency,
            filter: self.filter(),
            show_progress: !self.quiet && !self.json,
        }
    }
}
