//! Text output formatter for human-readable display
//!
//! Colors follow the classification: green for up to date, red for outdated,
//! yellow when currency cannot be checked, bold red for errors.

use crate::domain::{CheckSummary, Classification, ManifestReport, ReconciliationResult};
use crate::orchestrator::{OrchestratorError, OrchestratorResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Render the message for one result, without color
    fn result_message(&self, result: &ReconciliationResult) -> String {
        let entry = &result.entry;
        let repo = entry.repo_ref().unwrap_or_default();
        match &result.classification {
            Classification::UpToDate { .. } => format!(
                "Up to date: {} ({})",
                repo,
                entry.pinned_tag().unwrap_or_default()
            ),
            Classification::Outdated {
                latest,
                published_at,
            } => {
                let released = match published_at {
                    Some(at) if self.verbosity == Verbosity::Verbose => {
                        format!(" (released {})", at.format("%Y/%m/%d %H:%M"))
                    }
                    _ => String::new(),
                };
                format!(
                    "There is a newer version of: {}\n    have: {}\n    latest: {}{}",
                    repo,
                    entry.pinned_tag().unwrap_or_default(),
                    latest,
                    released
                )
            }
            Classification::Unverifiable => format!(
                "Unable to check currency, latest release undefined for {}",
                repo
            ),
            Classification::RawUrl => format!(
                "Raw url specified, cannot check for currency: {}",
                entry.raw_url().unwrap_or_default()
            ),
            Classification::Error { message } => {
                format!("Error checking {}: {}", entry.label(), message)
            }
        }
    }

    /// Format a single result line
    fn format_result(
        &self,
        result: &ReconciliationResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let message = self.result_message(result);
        if !self.color {
            return writeln!(writer, "  {}", message);
        }

        let colored = match result.classification {
            Classification::UpToDate { .. } => message.green(),
            Classification::Outdated { .. } => message.red(),
            Classification::Unverifiable | Classification::RawUrl => message.yellow(),
            Classification::Error { .. } => message.red().bold(),
        };
        writeln!(writer, "  {}", colored)
    }

    fn is_shown(&self, result: &ReconciliationResult) -> bool {
        self.verbosity != Verbosity::Quiet || result.is_outdated() || result.is_error()
    }

    fn format_errors(
        &self,
        errors: &[&OrchestratorError],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}:", "Errors".red().bold())?;
        } else {
            writeln!(writer, "Errors:")?;
        }
        for error in errors {
            if self.color {
                writeln!(writer, "  {} {}", "✗".red(), error)?;
            } else {
                writeln!(writer, "  - {}", error)?;
            }
        }
        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = &result.summary;

        if self.verbosity != Verbosity::Quiet {
            if summary.discovered.is_empty() {
                writeln!(writer, "No SOURCES manifests found")?;
            } else {
                writeln!(writer, "Found manifests:")?;
                for path in &summary.discovered {
                    writeln!(writer, "  {}", path.display())?;
                }
            }
            writeln!(writer)?;
        }

        for manifest in &summary.manifests {
            self.format_manifest(manifest, writer)?;
        }

        // Entry errors already appear inline; verbose mode repeats them in the list.
        let errors: Vec<&OrchestratorError> = result
            .errors
            .iter()
            .filter(|e| {
                self.verbosity == Verbosity::Verbose
                    || !matches!(e, OrchestratorError::EntryError { .. })
            })
            .collect();
        self.format_errors(&errors, writer)?;

        self.format_summary(summary, writer)
    }

    fn format_summary(
        &self,
        summary: &CheckSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let counts = summary.counts();

        let parts = [
            (counts.up_to_date, "up to date"),
            (counts.outdated, "outdated"),
            (counts.unverifiable, "unverifiable"),
            (counts.raw_url, "raw url"),
            (counts.error, "error"),
        ];

        let rendered: Vec<String> = parts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{} {}", count, label))
            .collect();

        let manifests = summary.manifests.len();
        let line = if rendered.is_empty() {
            format!("Checked {} manifest(s): no pinned sources", manifests)
        } else {
            format!(
                "Checked {} source(s) in {} manifest(s): {}",
                counts.total(),
                manifests,
                rendered.join(", ")
            )
        };

        if self.color {
            let styled = if counts.error > 0 || counts.outdated > 0 {
                line.bold()
            } else {
                line.green().bold()
            };
            writeln!(writer, "{}", styled)
        } else {
            writeln!(writer, "{}", line)
        }
    }

    fn format_manifest(
        &self,
        manifest: &ManifestReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let shown: Vec<&ReconciliationResult> = manifest
            .results
            .iter()
            .filter(|r| self.is_shown(r))
            .collect();

        if shown.is_empty() && self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let path_display = manifest.path.display().to_string();
        if self.color {
            writeln!(writer, "{}", path_display.bold())?;
        } else {
            writeln!(writer, "{}", path_display)?;
        }

        if manifest.results.is_empty() {
            writeln!(writer, "  (no sources declared)")?;
        }

        for result in shown {
            self.format_result(result, writer)?;
        }

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceEntry;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn repo(name: &str, tag: &str) -> SourceEntry {
        SourceEntry::repo(format!("github.com/acme/{}", name), tag)
    }

    fn sample_result() -> OrchestratorResult {
        let report = ManifestReport::with_results(
            "proj/SOURCES",
            vec![
                ReconciliationResult::up_to_date(repo("fresh", "2.0.0"), "2.0.0"),
                ReconciliationResult::outdated(
                    repo("stale", "1.0.0"),
                    "1.1.0",
                    Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
                ),
                ReconciliationResult::unverifiable(repo("nameless", "1.0")),
                ReconciliationResult::raw_url(SourceEntry::url("https://example.com/x.tgz")),
                ReconciliationResult::error(repo("gone", "1.0"), "no published release"),
            ],
        );
        let mut summary = CheckSummary::new(vec![
            PathBuf::from("proj/SOURCES"),
            PathBuf::from("broken/SOURCES"),
        ]);
        summary.add_manifest(report);

        OrchestratorResult {
            summary,
            errors: vec![
                OrchestratorError::ManifestLoadError {
                    path: "broken/SOURCES".to_string(),
                    message: "invalid yaml".to_string(),
                },
                OrchestratorError::EntryError {
                    path: "proj/SOURCES".to_string(),
                    entry: "github.com/acme/gone".to_string(),
                    message: "no published release".to_string(),
                },
            ],
        }
    }

    fn render(verbosity: Verbosity) -> String {
        let formatter = TextFormatter::with_color(verbosity, false);
        let mut out = Vec::new();
        formatter.format(&sample_result(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_normal_output_lists_everything() {
        let out = render(Verbosity::Normal);
        assert!(out.contains("Found manifests:\n  proj/SOURCES\n  broken/SOURCES"));
        assert!(out.contains("Up to date: github.com/acme/fresh"));
        assert!(out.contains("There is a newer version of: github.com/acme/stale"));
        assert!(out.contains("have: 1.0.0"));
        assert!(out.contains("latest: 1.1.0"));
        assert!(out.contains(
            "Unable to check currency, latest release undefined for github.com/acme/nameless"
        ));
        assert!(out.contains("Raw url specified, cannot check for currency: https://example.com/x.tgz"));
        assert!(out.contains("Error checking github.com/acme/gone: no published release"));
        assert!(out.contains("Failed to load broken/SOURCES: invalid yaml"));
        assert!(!out.contains("Failed to check"));
        assert!(!out.contains("released"));
        assert!(out.contains(
            "Checked 5 source(s) in 1 manifest(s): 1 up to date, 1 outdated, 1 unverifiable, 1 raw url, 1 error"
        ));
    }

    #[test]
    fn test_verbose_output_adds_dates_and_entry_errors() {
        let out = render(Verbosity::Verbose);
        assert!(out.contains("(released 2024/03/01 12:30)"));
        assert!(out.contains("Failed to check github.com/acme/gone in proj/SOURCES"));
    }

    #[test]
    fn test_quiet_output_only_problems() {
        let out = render(Verbosity::Quiet);
        assert!(!out.contains("Found manifests"));
        assert!(!out.contains("Up to date"));
        assert!(!out.contains("Raw url specified"));
        assert!(out.contains("There is a newer version of"));
        assert!(out.contains("Error checking"));
        assert!(out.contains("Checked 5 source(s)"));
    }

    #[test]
    fn test_no_manifests() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let result = OrchestratorResult {
            summary: CheckSummary::default(),
            errors: Vec::new(),
        };
        let mut out = Vec::new();
        formatter.format(&result, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("No SOURCES manifests found"));
        assert!(out.contains("Checked 0 manifest(s): no pinned sources"));
    }

    #[test]
    fn test_empty_manifest() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let mut out = Vec::new();
        formatter
            .format_manifest(&ManifestReport::new("empty/SOURCES"), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("empty/SOURCES\n  (no sources declared)"));
    }

    #[test]
    fn test_colored_output_still_contains_text() {
        let formatter = TextFormatter::new(Verbosity::Normal);
        let mut out = Vec::new();
        formatter.format(&sample_result(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Up to date"));
    }
}
