//! Reconciliation of pinned entries against their latest upstream release
//!
//! For each [`SourceEntry`] the engine:
//! 1. classifies raw URL pins without any lookup,
//! 2. parses the repository reference,
//! 3. asks the [`ReleaseLookup`] for the latest release,
//! 4. compares the pinned tag with the release name.
//!
//! Failures in steps 2-4 become an `Error` classification for that entry.

use crate::domain::{compare_tags, ReconciliationResult, RepoRef, SourceEntry};
use crate::error::AppError;
use crate::registry::ReleaseLookup;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do after an entry fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Record the failure and keep checking the remaining entries
    #[default]
    Continue,
    /// Record the failure and skip the remaining entries of the manifest
    StopOnFirst,
}

/// Engine that classifies every entry of a manifest
#[derive(Clone)]
pub struct ReconciliationEngine {
    lookup: Arc<dyn ReleaseLookup>,
    policy: ErrorPolicy,
}

impl ReconciliationEngine {
    /// Create an engine using the given release lookup
    pub fn new(lookup: Arc<dyn ReleaseLookup>) -> Self {
        Self {
            lookup,
            policy: ErrorPolicy::default(),
        }
    }

    /// Set the error policy
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reconcile entries in order, one result per checked entry
    pub async fn reconcile(&self, entries: &[SourceEntry]) -> Vec<ReconciliationResult> {
        let mut results = Vec::with_capacity(entries.len());

        for entry in entries {
            let result = self.check_entry(entry).await;
            let failed = result.is_error();
            results.push(result);

            if failed && self.policy == ErrorPolicy::StopOnFirst {
                debug!(
                    skipped = entries.len() - results.len(),
                    "stopping after first failed entry"
                );
                break;
            }
        }

        results
    }

    /// Classify a single entry
    pub async fn check_entry(&self, entry: &SourceEntry) -> ReconciliationResult {
        match self.try_check_entry(entry).await {
            Ok(result) => result,
            Err(e) => {
                warn!(entry = %entry, api = self.lookup.api_name(), "check failed: {}", e);
                ReconciliationResult::error(entry.clone(), e.to_string())
            }
        }
    }

    async fn try_check_entry(&self, entry: &SourceEntry) -> Result<ReconciliationResult, AppError> {
        if entry.raw_url().is_some() && entry.repo_ref().is_none() {
            return Ok(ReconciliationResult::raw_url(entry.clone()));
        }

        let repo = RepoRef::parse(entry.repo_ref().unwrap_or_default())?;
        let release = self.lookup.latest_release(&repo).await?;

        // GitHub reports untitled releases as "", so blank names count as absent.
        let latest = match release.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => {
                debug!(repo = %repo, "latest release has no name");
                return Ok(ReconciliationResult::unverifiable(entry.clone()));
            }
        };

        let pinned = entry.pinned_tag().unwrap_or_default();
        let result = match compare_tags(pinned, latest)? {
            Ordering::Less => {
                ReconciliationResult::outdated(entry.clone(), latest, release.published_at)
            }
            Ordering::Equal | Ordering::Greater => {
                ReconciliationResult::up_to_date(entry.clone(), latest)
            }
        };

        debug!(entry = %entry, latest, status = result.classification.kind(), "checked");
        Ok(result)
    }
}
