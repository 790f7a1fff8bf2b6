//! Check result summary types
//!
//! Provides structures for tracking reconciliation results at manifest and
//! overall levels.

use super::{Classification, ReconciliationResult};
use serde::Serialize;
use std::path::PathBuf;

/// Reconciliation results for a single manifest file
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestReport {
    /// Path to the manifest file
    pub path: PathBuf,
    /// One result per declared entry, in manifest order
    pub results: Vec<ReconciliationResult>,
}

impl ManifestReport {
    /// Creates an empty report
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            results: Vec::new(),
        }
    }

    /// Creates a report with results
    pub fn with_results(path: impl Into<PathBuf>, results: Vec<ReconciliationResult>) -> Self {
        Self {
            path: path.into(),
            results,
        }
    }

    /// Returns all outdated results
    pub fn outdated(&self) -> impl Iterator<Item = &ReconciliationResult> {
        self.results.iter().filter(|r| r.is_outdated())
    }
}

/// Totals per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub up_to_date: usize,
    pub outdated: usize,
    pub unverifiable: usize,
    pub raw_url: usize,
    pub error: usize,
}

impl Counts {
    /// Add one result to the totals
    pub fn record(&mut self, classification: &Classification) {
        match classification {
            Classification::UpToDate { .. } => self.up_to_date += 1,
            Classification::Outdated { .. } => self.outdated += 1,
            Classification::Unverifiable => self.unverifiable += 1,
            Classification::RawUrl => self.raw_url += 1,
            Classification::Error { .. } => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.up_to_date + self.outdated + self.unverifiable + self.raw_url + self.error
    }
}

/// Overall summary of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckSummary {
    /// Every manifest that was discovered, in path order
    pub discovered: Vec<PathBuf>,
    /// Reports for manifests that loaded successfully, in path order
    pub manifests: Vec<ManifestReport>,
}

impl CheckSummary {
    /// Creates an empty summary
    pub fn new(discovered: Vec<PathBuf>) -> Self {
        Self {
            discovered,
            manifests: Vec::new(),
        }
    }

    /// Adds a manifest report
    pub fn add_manifest(&mut self, report: ManifestReport) {
        self.manifests.push(report);
    }

    /// Sort reports by path so output does not depend on task completion order
    pub fn sort(&mut self) {
        self.manifests.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Totals across all manifests
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();
        for result in self.all_results() {
            counts.record(&result.classification);
        }
        counts
    }

    /// Returns all results across all manifests
    pub fn all_results(&self) -> impl Iterator<Item = &ReconciliationResult> {
        self.manifests.iter().flat_map(|m| m.results.iter())
    }

    pub fn has_outdated(&self) -> bool {
        self.all_results().any(|r| r.is_outdated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceEntry;

    fn repo(name: &str) -> SourceEntry {
        SourceEntry::repo(format!("github.com/acme/{}", name), "1.0.0")
    }

    fn sample_report(path: &str) -> ManifestReport {
        ManifestReport::with_results(
            path,
            vec![
                ReconciliationResult::up_to_date(repo("a"), "1.0.0"),
                ReconciliationResult::outdated(repo("b"), "2.0.0", None),
                ReconciliationResult::raw_url(SourceEntry::url("https://example.com/c.tgz")),
                ReconciliationResult::error(repo("d"), "not found"),
            ],
        )
    }

    #[test]
    fn test_manifest_report_outdated() {
        let report = sample_report("a/SOURCES");
        let outdated: Vec<_> = report.outdated().collect();
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].entry.repo_ref(), Some("github.com/acme/b"));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = CheckSummary::default();
        summary.add_manifest(sample_report("b/SOURCES"));
        summary.add_manifest(sample_report("a/SOURCES"));

        let counts = summary.counts();
        assert_eq!(counts.up_to_date, 2);
        assert_eq!(counts.outdated, 2);
        assert_eq!(counts.raw_url, 2);
        assert_eq!(counts.error, 2);
        assert_eq!(counts.unverifiable, 0);
        assert_eq!(counts.total(), 8);
        assert!(summary.has_outdated());
    }

    #[test]
    fn test_summary_sort_by_path() {
        let mut summary = CheckSummary::default();
        summary.add_manifest(sample_report("z/SOURCES"));
        summary.add_manifest(sample_report("a/SOURCES"));
        summary.sort();
        assert_eq!(summary.manifests[0].path, PathBuf::from("a/SOURCES"));
        assert_eq!(summary.manifests[1].path, PathBuf::from("z/SOURCES"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = CheckSummary::new(Vec::new());
        assert_eq!(summary.counts().total(), 0);
        assert!(!summary.has_outdated());
    }
}
