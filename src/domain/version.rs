//! Tolerant version parsing and comparison
//!
//! Release tags in the wild are noisy ("v1.2", "release-2.0.1", "1.4.0-rc1").
//! This module extracts an ordered numeric vector from such strings and
//! compares two of them with short-vector zero padding, so that "1.2" equals
//! "1.2.0" and is greater than "1.1.9".

use crate::error::VersionError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Maximum number of numeric components extracted from a tag
pub const MAX_COMPONENTS: usize = 5;

// Leading non-digits are skipped. Components after the first may carry a
// minus sign so that "1.-2" is rejected instead of silently truncated.
// Digits are ASCII only; other Unicode digits count as prose.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[^0-9]*([0-9]+)(?:\.(-?[0-9]+))?(?:\.(-?[0-9]+))?(?:\.(-?[0-9]+))?(?:\.(-?[0-9]+))?",
    )
    .unwrap()
});

/// Ordered numeric components of a version, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionVector(Vec<u64>);

impl VersionVector {
    /// Parse a tag string into its numeric components
    ///
    /// No zero padding happens here: "v2.3" yields `[2, 3]`.
    pub fn parse(tag: &str) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(tag)
            .ok_or_else(|| VersionError::no_digits(tag))?;

        let mut components = Vec::with_capacity(MAX_COMPONENTS);
        for group in caps.iter().skip(1).flatten() {
            let raw = group.as_str();
            if raw.starts_with('-') {
                return Err(VersionError::negative(tag, raw));
            }
            let value = raw
                .parse::<u64>()
                .map_err(|e| VersionError::malformed(tag, raw, e.to_string()))?;
            components.push(value);
        }

        Ok(Self(components))
    }

    /// The extracted components
    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Number of extracted components
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a successfully parsed vector
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u64>> for VersionVector {
    fn from(components: Vec<u64>) -> Self {
        Self(components)
    }
}

impl Ord for VersionVector {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.0.len().max(other.0.len());
        for i in 0..width {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Compare two tag strings
///
/// Returns `Less` when `a` is older than `b`. If either side fails to parse,
/// the error names both inputs.
pub fn compare_tags(a: &str, b: &str) -> Result<Ordering, VersionError> {
    match (VersionVector::parse(a), VersionVector::parse(b)) {
        (Ok(left), Ok(right)) => Ok(left.cmp(&right)),
        (left, right) => {
            let detail = [left.err(), right.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(VersionError::compare(a, b, detail))
        }
    }
}
