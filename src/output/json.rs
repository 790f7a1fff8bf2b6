//! JSON output formatter for machine processing

use crate::domain::{CheckSummary, Classification, Counts, ManifestReport, ReconciliationResult};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode drops up-to-date and raw URL results
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn build_manifest(&self, manifest: &ManifestReport) -> JsonManifest {
        JsonManifest {
            path: manifest.path.display().to_string(),
            results: manifest
                .results
                .iter()
                .filter(|r| {
                    self.verbosity != Verbosity::Quiet || r.is_outdated() || r.is_error()
                })
                .map(JsonResult::from)
                .collect(),
        }
    }

    fn write_json<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Summary statistics
    summary: JsonSummary,
    /// Per-manifest results
    manifests: Vec<JsonManifest>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    discovered: usize,
    checked: usize,
    #[serde(flatten)]
    counts: Counts,
}

impl From<&CheckSummary> for JsonSummary {
    fn from(summary: &CheckSummary) -> Self {
        Self {
            discovered: summary.discovered.len(),
            checked: summary.manifests.len(),
            counts: summary.counts(),
        }
    }
}

#[derive(Serialize)]
struct JsonManifest {
    path: String,
    results: Vec<JsonResult>,
}

/// JSON representation of one entry
#[derive(Serialize)]
struct JsonResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<&ReconciliationResult> for JsonResult {
    fn from(result: &ReconciliationResult) -> Self {
        let (published_at, message) = match &result.classification {
            Classification::Outdated { published_at, .. } => {
                (published_at.map(|at| at.to_rfc3339()), None)
            }
            Classification::Error { message } => (None, Some(message.clone())),
            _ => (None, None),
        };

        Self {
            status: result.classification.kind(),
            repo: result.entry.repo_ref().map(str::to_string),
            tag: result.entry.pinned_tag().map(str::to_string),
            url: result.entry.raw_url().map(str::to_string),
            latest: result.classification.latest().map(str::to_string),
            published_at,
            message,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: JsonSummary::from(&result.summary),
            manifests: result
                .summary
                .manifests
                .iter()
                .map(|m| self.build_manifest(m))
                .collect(),
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };
        self.write_json(&output, writer)
    }

    fn format_summary(
        &self,
        summary: &CheckSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write_json(&JsonSummary::from(summary), writer)
    }

    fn format_manifest(
        &self,
        manifest: &ManifestReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write_json(&self.build_manifest(manifest), writer)
    }
}
