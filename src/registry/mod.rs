//! Release lookup adapters
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - The [`ReleaseLookup`] seam used by the reconciliation engine
//! - GitHub Releases API adapter

mod client;
mod github;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use github::{GitHubReleases, DEFAULT_CONCURRENCY, GITHUB_API_URL};

use crate::domain::RepoRef;
use crate::error::LookupError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Latest published release of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestRelease {
    /// Release name; `None` when the API reports it as absent or null
    pub name: Option<String>,
    /// Publication timestamp, if reported
    pub published_at: Option<DateTime<Utc>>,
}

impl LatestRelease {
    /// Creates a named release without a timestamp
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            published_at: None,
        }
    }

    /// Creates a release without a name
    pub fn unnamed() -> Self {
        Self::default()
    }
}

/// Trait for release lookup adapters
#[async_trait]
pub trait ReleaseLookup: Send + Sync {
    /// Name of the upstream API, for messages
    fn api_name(&self) -> &'static str;

    /// Fetch the latest published release of a repository
    async fn latest_release(&self, repo: &RepoRef) -> Result<LatestRelease, LookupError>;
}
