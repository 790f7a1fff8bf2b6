//! Check orchestrator for coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: discover → load → reconcile → summarize
//! - One concurrent task per manifest, all joined before results are reported
//! - Error handling with partial continuation: a bad manifest or entry is
//!   recorded and every other manifest is still checked

use crate::cli::CliArgs;
use crate::domain::{CheckSummary, Classification, ManifestReport};
use crate::error::AppError;
use crate::manifest::{discover_manifests, load_config};
use crate::progress::CheckProgress;
use crate::reconcile::{ErrorPolicy, ReconciliationEngine};
use crate::registry::{GitHubReleases, HttpClient, ReleaseLookup};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Orchestrator for coordinating the check workflow
pub struct Orchestrator {
    /// Directory (or single manifest) to scan
    root: PathBuf,
    /// Engine shared by every manifest task
    engine: ReconciliationEngine,
    /// Whether to show a progress bar on stderr
    show_progress: bool,
}

/// Result of running the orchestrator
pub struct OrchestratorResult {
    /// Check summary with all manifest reports
    pub summary: CheckSummary,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that can occur during orchestration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Failed to load or validate a manifest
    ManifestLoadError { path: String, message: String },
    /// A single entry could not be checked
    EntryError {
        path: String,
        entry: String,
        message: String,
    },
    /// A manifest task panicked or was cancelled
    TaskError(String),
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::ManifestLoadError { path, message } => {
                write!(f, "Failed to load {}: {}", path, message)
            }
            OrchestratorError::EntryError {
                path,
                entry,
                message,
            } => write!(f, "Failed to check {} in {}: {}", entry, path, message),
            OrchestratorError::TaskError(msg) => write!(f, "Manifest task failed: {}", msg),
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl Orchestrator {
    /// Create a new orchestrator from CLI arguments
    pub fn new(args: &CliArgs) -> Result<Self, AppError> {
        let client = HttpClient::with_timeout(Duration::from_secs(args.timeout))?;
        let lookup =
            GitHubReleases::with_base_url(client, &args.api_url).with_concurrency(args.concurrency);

        let policy = if args.fail_fast {
            ErrorPolicy::StopOnFirst
        } else {
            ErrorPolicy::Continue
        };

        let engine = ReconciliationEngine::new(Arc::new(lookup)).with_policy(policy);
        Ok(Self {
            root: args.path.clone(),
            engine,
            show_progress: !args.quiet && !args.json,
        })
    }

    /// Create an orchestrator with a custom release lookup (for testing)
    pub fn with_lookup(root: impl Into<PathBuf>, lookup: Arc<dyn ReleaseLookup>) -> Self {
        Self {
            root: root.into(),
            engine: ReconciliationEngine::new(lookup),
            show_progress: false,
        }
    }

    /// Replace the engine error policy
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.engine = self.engine.with_policy(policy);
        self
    }

    /// Run the check workflow
    ///
    /// Only failing to walk the root is fatal; everything else is collected
    /// into [`OrchestratorResult::errors`].
    pub async fn run(&self) -> Result<OrchestratorResult, AppError> {
        let mut progress = CheckProgress::new(self.show_progress);

        // Step 1: Discover manifest files
        progress.searching(&self.root);
        let discovered = discover_manifests(&self.root);
        progress.clear();
        let manifests = discovered?;
        info!(count = manifests.len(), root = %self.root.display(), "found manifests");

        let mut summary = CheckSummary::new(manifests.clone());
        let mut load_errors = Vec::new();

        if manifests.is_empty() {
            return Ok(OrchestratorResult {
                summary,
                errors: load_errors,
            });
        }

        // Step 2: One task per manifest
        progress.checking(manifests.len());
        let mut tasks = JoinSet::new();
        for path in manifests {
            let engine = self.engine.clone();
            tasks.spawn(async move { check_manifest(&engine, path).await });
        }

        // Step 3: Join every task before reporting
        while let Some(joined) = tasks.join_next().await {
            progress.manifest_done();
            match joined {
                Ok(Ok(report)) => summary.add_manifest(report),
                Ok(Err(error)) => load_errors.push(error),
                Err(e) => {
                    warn!("manifest task failed: {}", e);
                    load_errors.push(OrchestratorError::TaskError(e.to_string()));
                }
            }
        }
        progress.clear();

        summary.sort();
        load_errors.sort_by_key(|e| e.to_string());

        let mut errors = load_errors;
        errors.extend(entry_errors(&summary));

        Ok(OrchestratorResult { summary, errors })
    }
}

/// Load one manifest and reconcile its entries
async fn check_manifest(
    engine: &ReconciliationEngine,
    path: PathBuf,
) -> Result<ManifestReport, OrchestratorError> {
    let config = load_config(&path).map_err(|e| {
        warn!(path = %path.display(), "{}", e);
        OrchestratorError::ManifestLoadError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    info!(path = %path.display(), entries = config.sources.len(), "checking manifest");
    let results = engine.reconcile(&config.sources).await;
    Ok(ManifestReport::with_results(path, results))
}

/// Collect entry-level failures in report order
fn entry_errors(summary: &CheckSummary) -> Vec<OrchestratorError> {
    summary
        .manifests
        .iter()
        .flat_map(|report| {
            report.results.iter().filter_map(move |result| {
                match &result.classification {
                    Classification::Error { message } => Some(OrchestratorError::EntryError {
                        path: report.path.display().to_string(),
                        entry: result.entry.label().to_string(),
                        message: message.clone(),
                    }),
                    _ => None,
                }
            })
        })
        .collect()
}
