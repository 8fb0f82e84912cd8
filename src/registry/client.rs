//! HTTP client for package index requests
//!
//! Every request goes through `get_with_context`, which classifies the
//! outcome of one attempt and retries transient failures with exponential
//! backoff:
//! - 429 Too Many Requests → `RateLimitExceeded` once retries run out
//! - 5xx, connection errors and timeouts → retried, then reported as-is
//! - 404 → `PackageNotFound`, never retried

use crate::error::RegistryError;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("requp/", env!("CARGO_PKG_VERSION"));

/// Default number of retries after the first attempt
pub const MAX_RETRIES: u32 = 3;

/// Delay before the first retry; doubles on every further retry
const BASE_DELAY: Duration = Duration::from_millis(100);

/// Outcome of a single request attempt
enum Attempt {
    /// Final answer, success or not
    Done(Result<Response, RegistryError>),
    /// Transient failure worth another try
    Retry(RegistryError),
}

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the number of retries after the first attempt
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the configured number of retries
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// GET `url`, retrying transient failures
    ///
    /// `package` and `registry` only label the returned errors.
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        let mut delay = BASE_DELAY;
        let mut retries = 0;

        loop {
            match self.attempt(url, package, registry).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(error) if retries >= self.max_retries => return Err(error),
                Attempt::Retry(_) => {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    retries += 1;
                }
            }
        }
    }

    /// GET `url` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;
        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(package, registry, format!("failed to parse JSON: {}", e))
        })
    }

    async fn attempt(&self, url: &str, package: &str, registry: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retry(RegistryError::timeout(package, registry))
            }
            Err(e) => {
                return Attempt::Retry(RegistryError::network_error(
                    package,
                    registry,
                    e.to_string(),
                ))
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            Attempt::Retry(RegistryError::rate_limit_exceeded(registry))
        } else if status == StatusCode::NOT_FOUND {
            Attempt::Done(Err(RegistryError::package_not_found(package, registry)))
        } else if status.is_server_error() {
            Attempt::Retry(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            ))
        } else if !status.is_success() {
            Attempt::Done(Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            )))
        } else {
            Attempt::Done(Ok(response))
        }
    }
}
