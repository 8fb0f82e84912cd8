//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: read → classify → fetch → decide → write
//! - Parallel index lookups bounded by a semaphore, one per distinct package
//! - Dry-run mode support
//! - Package filter application
//! - Per-package error handling: a failed lookup only affects its own lines

use crate::domain::{FileUpdateResult, LineKind, SkipReason, UpdateResult, UpdateWarning};
use crate::error::{AppError, ConfigError, RegistryError};
use crate::manifest::RequirementsFile;
use crate::progress::Progress;
use crate::registry::RegistryAdapter;
use crate::update::{UpdateDecider, UpdateFilter};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of concurrent index lookups
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Lookup outcome per normalized package name
type Lookups = HashMap<String, Result<String, RegistryError>>;

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum concurrent index requests
    pub concurrency: usize,
    /// Package filter
    pub filter: UpdateFilter,
    /// Whether to draw a progress bar
    pub show_progress: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            filter: UpdateFilter::new(),
            show_progress: false,
        }
    }
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    config: OrchestratorConfig,
    adapter: Arc<dyn RegistryAdapter>,
    semaphore: Arc<Semaphore>,
}

impl Orchestrator {
    /// Create a new orchestrator querying `adapter`
    pub fn new(
        config: OrchestratorConfig,
        adapter: Arc<dyn RegistryAdapter>,
    ) -> Result<Self, ConfigError> {
        if config.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: config.concurrency,
            });
        }

        let semaphore = Arc::new(Semaphore::new(config.concurrency));
        Ok(Self {
            config,
            adapter,
            semaphore,
        })
    }

    /// Update every pinned requirement in `path` to the latest release
    ///
    /// With `dry_run` the file is left untouched. The file is also left
    /// untouched when no line changes. Lookup failures and unparsable lines
    /// are reported as warnings and never abort the run.
    pub async fn process_file(
        &self,
        path: impl AsRef<Path>,
        dry_run: bool,
    ) -> Result<FileUpdateResult, AppError> {
        let path = path.as_ref();
        let file = RequirementsFile::read(path)?;
        let decider = UpdateDecider::new(self.config.filter.clone());

        // Step 1: Collect distinct packages that need a lookup
        let packages: Vec<String> = file
            .pinned_packages()
            .into_iter()
            .filter(|name| self.config.filter.should_process_package(name))
            .collect();

        // Step 2: Query the index
        let lookups = self.fetch_all(packages).await;

        // Step 3: Decide per line, in file order
        let mut result = FileUpdateResult::new(path, dry_run);
        let mut reported: HashSet<String> = HashSet::new();
        let mut reported_latest: HashSet<String> = HashSet::new();

        for (index, line) in file.lines.iter().cloned().enumerate() {
            let line_number = index + 1;

            if line.kind == LineKind::Malformed {
                result.add_warning(UpdateWarning::MalformedLine {
                    line_number,
                    text: line.content().trim().to_string(),
                });
            }

            let decision = match decider.should_skip(&line) {
                Some(reason) => UpdateResult::skip(line, reason),
                None => {
                    let key = line.normalized_name().unwrap_or_default();
                    let decision = match lookups.get(&key) {
                        Some(Ok(latest)) => decider.decide(&line, Ok(latest.as_str())),
                        Some(Err(e)) => decider.decide(&line, Err(e)),
                        None => decider.decide(
                            &line,
                            Err(&RegistryError::network_error(
                                &key,
                                self.adapter.registry_name(),
                                "no lookup result",
                            )),
                        ),
                    };

                    if let Some(Err(e)) = lookups.get(&key) {
                        if reported.insert(key) {
                            result.add_warning(UpdateWarning::LookupFailure {
                                package: line.name.clone().unwrap_or_default(),
                                message: e.to_string(),
                            });
                        }
                    }
                    decision
                }
            };

            if let Some(SkipReason::InvalidVersion(version)) = decision.skip_reason() {
                let line = decision.line();
                // a bad pin is reported per line, a bad latest release once per package
                let from_index = line.version.as_deref() != Some(version.as_str());
                if !from_index || reported_latest.insert(line.normalized_name().unwrap_or_default()) {
                    result.add_warning(UpdateWarning::UnparsableVersion {
                        line_number,
                        package: line.name.clone().unwrap_or_default(),
                        version: version.clone(),
                    });
                }
            }

            result.add_result(line_number, decision);
        }

        // Step 4: Apply updates (unless dry-run)
        if result.has_updates() && !dry_run {
            file.write(&result.rendered())?;
            result.written = true;
        }

        Ok(result)
    }

    /// Look up every package concurrently
    ///
    /// Every requested package gets an entry, even if its task panicked.
    async fn fetch_all(&self, packages: Vec<String>) -> Lookups {
        let mut progress = Progress::new(self.config.show_progress);
        progress.start(packages.len() as u64);

        let mut tasks = JoinSet::new();
        for package in &packages {
            let adapter = Arc::clone(&self.adapter);
            let semaphore = Arc::clone(&self.semaphore);
            let package = package.clone();

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => adapter.fetch_latest_version(&package).await,
                    Err(_) => Err(RegistryError::network_error(
                        &package,
                        adapter.registry_name(),
                        "lookup queue closed",
                    )),
                };
                (package, result)
            });
        }

        let mut lookups = Lookups::new();
        while let Some(joined) = tasks.join_next().await {
            if let Ok((package, result)) = joined {
                progress.checked(&package);
                lookups.insert(package, result);
            }
        }
        progress.finish_and_clear();

        for package in packages {
            if !lookups.contains_key(&package) {
                let error = RegistryError::network_error(
                    &package,
                    self.adapter.registry_name(),
                    "lookup task aborted",
                );
                lookups.insert(package, Err(error));
            }
        }

        lookups
    }
}
