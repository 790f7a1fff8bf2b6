//! Core domain models for pincheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Source entries and manifest configs
//! - Tolerant version vectors and their comparison
//! - Repository references
//! - Reconciliation results and summaries

mod reconciliation;
mod repo_ref;
mod source_entry;
mod summary;
mod version;

pub use reconciliation::{Classification, ReconciliationResult};
pub use repo_ref::{RepoRef, REPO_HOST};
pub use source_entry::{Config, SourceEntry};
pub use summary::{CheckSummary, Counts, ManifestReport};
pub use version::{compare_tags, VersionVector, MAX_COMPONENTS};
