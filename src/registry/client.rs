//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling

use crate::error::LookupError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header; the GitHub API rejects requests without one
const DEFAULT_USER_AGENT: &str = concat!("pincheck/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, LookupError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                LookupError::network("HTTP client", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Create a client with the given timeout and the default User-Agent
    pub fn with_timeout(timeout: Duration) -> Result<Self, LookupError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic; `repo` is used for error context
    pub async fn get(&self, url: &str, repo: &str) -> Result<reqwest::Response, LookupError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            debug!(url, attempt, "GET");
            match self
                .client
                .get(url)
                .header("Accept", "application/vnd.github+json")
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LookupError::rate_limited(repo));

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                        }
                        continue;
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LookupError::not_found(repo));
                    }

                    if !status.is_success() {
                        return Err(LookupError::network(repo, format!("HTTP {}", status)));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(LookupError::timeout(repo));
                    } else {
                        last_error = Some(LookupError::network(repo, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LookupError::network(repo, "unknown error")))
    }

    /// Perform a GET request and decode the body as a JSON object
    ///
    /// Bodies that cannot be read, are not JSON, or are JSON but not an
    /// object are reported as [`LookupError::InvalidResponse`].
    pub async fn get_json_object(
        &self,
        url: &str,
        repo: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>, LookupError> {
        let response = self.get(url, repo).await?;

        let body = response.text().await.map_err(|e| {
            LookupError::invalid_response(repo, format!("unable to read body: {}", e))
        })?;

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(LookupError::invalid_response(
                repo,
                format!("expected a JSON object, got: {}", truncate(&other.to_string())),
            )),
            Err(e) => Err(LookupError::invalid_response(
                repo,
                format!("unable to parse body: {}; body: {}", e, truncate(&body)),
            )),
        }
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
