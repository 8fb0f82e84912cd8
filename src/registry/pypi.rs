//! PyPI JSON API adapter
//!
//! Fetches the latest release of a package from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI API base URL
pub const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
    name: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    info: PackageInfo,
}

/// Package summary; `version` is the latest non-yanked release
#[derive(Debug, Deserialize)]
struct PackageInfo {
    version: Option<String>,
}

impl PyPIAdapter {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, PYPI_API_URL)
    }

    /// Create an adapter for a PyPI-compatible JSON API at `base_url`
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let name = if base_url == PYPI_API_URL {
            "PyPI".to_string()
        } else {
            base_url.clone()
        };
        Self {
            client,
            base_url,
            name,
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for PyPIAdapter {
    fn registry_name(&self) -> &str {
        &self.name
    }

    async fn fetch_latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        response
            .info
            .version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                RegistryError::invalid_response(package, self.registry_name(), "missing info.version")
            })
    }
}
