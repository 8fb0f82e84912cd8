//! Registry adapters for fetching package version information
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - PyPI JSON API adapter (also used for PyPI-compatible indexes)

mod client;
mod pypi;
#[cfg(test)]
mod test_server;

pub use client::{HttpClient, DEFAULT_TIMEOUT, MAX_RETRIES};
pub use pypi::{PyPIAdapter, PYPI_API_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &str;

    /// Fetch the latest released version of a package
    async fn fetch_latest_version(&self, package: &str) -> Result<String, RegistryError>;
}
