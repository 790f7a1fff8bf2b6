//! Repository references of the form `github.com/<owner>/<project>`

use crate::error::RepoRefError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Code hosting domain every repository reference must start with
pub const REPO_HOST: &str = "github.com";

// Anything after the project segment (sub-paths, ".git") is ignored.
static REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^github\.com/([^/]+)/([^/]+)").unwrap());

/// Owner and project extracted from a repository reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub project: String,
}

impl RepoRef {
    /// Parse a canonical repository reference
    pub fn parse(reference: &str) -> Result<Self, RepoRefError> {
        let caps = REPO_RE
            .captures(reference)
            .ok_or_else(|| RepoRefError::new(reference))?;

        Ok(Self {
            owner: caps[1].to_string(),
            project: caps[2].to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.project)
    }
}
