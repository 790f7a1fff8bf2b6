//! Per-entry reconciliation outcome types

use super::SourceEntry;
use chrono::{DateTime, Utc};
use std::fmt;

/// How a pinned entry relates to its latest upstream release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Pinned tag is at or ahead of the latest release
    UpToDate {
        /// Latest release tag observed upstream
        latest: String,
    },
    /// A newer release than the pinned tag exists
    Outdated {
        /// Latest release tag observed upstream
        latest: String,
        /// When the latest release was published, if reported
        published_at: Option<DateTime<Utc>>,
    },
    /// Upstream has a latest release but it carries no name
    Unverifiable,
    /// Entry pins a raw URL; there is nothing to compare against
    RawUrl,
    /// Lookup, reference or version parsing failed for this entry
    Error {
        /// Human-readable failure description
        message: String,
    },
}

impl Classification {
    /// Stable snake_case name of the classification
    pub fn kind(&self) -> &'static str {
        match self {
            Classification::UpToDate { .. } => "up_to_date",
            Classification::Outdated { .. } => "outdated",
            Classification::Unverifiable => "unverifiable",
            Classification::RawUrl => "raw_url",
            Classification::Error { .. } => "error",
        }
    }

    /// Latest observed tag, when a comparison was made
    pub fn latest(&self) -> Option<&str> {
        match self {
            Classification::UpToDate { latest } | Classification::Outdated { latest, .. } => {
                Some(latest)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::UpToDate { .. } => write!(f, "up to date"),
            Classification::Outdated { latest, .. } => write!(f, "outdated (latest {})", latest),
            Classification::Unverifiable => write!(f, "latest release undefined"),
            Classification::RawUrl => write!(f, "raw url"),
            Classification::Error { message } => write!(f, "error: {}", message),
        }
    }
}

/// Outcome of reconciling a single source entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// The entry as declared in the manifest
    pub entry: SourceEntry,
    /// The classification reached for it
    pub classification: Classification,
}

impl ReconciliationResult {
    /// Creates a result for an entry
    pub fn new(entry: SourceEntry, classification: Classification) -> Self {
        Self {
            entry,
            classification,
        }
    }

    /// Creates an UpToDate result
    pub fn up_to_date(entry: SourceEntry, latest: impl Into<String>) -> Self {
        Self::new(
            entry,
            Classification::UpToDate {
                latest: latest.into(),
            },
        )
    }

    /// Creates an Outdated result
    pub fn outdated(
        entry: SourceEntry,
        latest: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self::new(
            entry,
            Classification::Outdated {
                latest: latest.into(),
                published_at,
            },
        )
    }

    /// Creates an Unverifiable result
    pub fn unverifiable(entry: SourceEntry) -> Self {
        Self::new(entry, Classification::Unverifiable)
    }

    /// Creates a RawUrl result
    pub fn raw_url(entry: SourceEntry) -> Self {
        Self::new(entry, Classification::RawUrl)
    }

    /// Creates an Error result
    pub fn error(entry: SourceEntry, message: impl Into<String>) -> Self {
        Self::new(
            entry,
            Classification::Error {
                message: message.into(),
            },
        )
    }

    pub fn is_up_to_date(&self) -> bool {
        matches!(self.classification, Classification::UpToDate { .. })
    }

    pub fn is_outdated(&self) -> bool {
        matches!(self.classification, Classification::Outdated { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.classification, Classification::Error { .. })
    }
}

impl fmt::Display for ReconciliationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry, self.classification)
    }
}
