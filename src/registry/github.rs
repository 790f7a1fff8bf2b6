//! GitHub Releases API adapter
//!
//! Fetches the latest published release of a repository.
//! API endpoint: https://api.github.com/repos/{owner}/{project}/releases/latest

use crate::domain::RepoRef;
use crate::error::LookupError;
use crate::registry::{HttpClient, LatestRelease, ReleaseLookup};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Default number of lookups allowed in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// GitHub Releases adapter
pub struct GitHubReleases {
    client: HttpClient,
    base_url: String,
    limiter: Arc<Semaphore>,
}

impl GitHubReleases {
    /// Create an adapter against the public GitHub API
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GITHUB_API_URL)
    }

    /// Create an adapter against a custom API base (mock servers, GitHub Enterprise)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            limiter: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Limit how many lookups may run concurrently (minimum 1)
    pub fn with_concurrency(mut self, permits: usize) -> Self {
        self.limiter = Arc::new(Semaphore::new(permits.max(1)));
        self
    }

    /// Build the latest-release URL for a repository
    fn build_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, repo.owner, repo.project
        )
    }
}

#[async_trait]
impl ReleaseLookup for GitHubReleases {
    fn api_name(&self) -> &'static str {
        "GitHub"
    }

    async fn latest_release(&self, repo: &RepoRef) -> Result<LatestRelease, LookupError> {
        let label = repo.to_string();
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|e| LookupError::network(&label, e.to_string()))?;

        let url = self.build_url(repo);
        let body = self.client.get_json_object(&url, &label).await?;

        let name = match body.get("name") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(LookupError::invalid_response(
                    &label,
                    format!("release name is not a string: {}", other),
                ))
            }
        };

        let published_at = body
            .get("published_at")
            .and_then(|v| v.as_str())
            .and_then(|raw| match raw.parse::<DateTime<Utc>>() {
                Ok(at) => Some(at),
                Err(e) => {
                    warn!(repo = %label, "ignoring unparseable published_at '{}': {}", raw, e);
                    None
                }
            });

        debug!(repo = %label, ?name, "latest release");
        Ok(LatestRelease { name, published_at })
    }
}
