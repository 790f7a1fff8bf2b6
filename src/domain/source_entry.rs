//! Pinned source entries as declared in a SOURCES manifest

use crate::error::ValidationError;
use serde::Deserialize;
use std::fmt;

/// One pinned dependency: either a repository + tag, or a raw URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    /// Canonical repository reference (`github.com/<owner>/<project>`)
    #[serde(rename = "Repo", alias = "repo", default)]
    pub repo: Option<String>,
    /// Pinned tag, required when `repo` is set
    #[serde(rename = "Tag", alias = "tag", default)]
    pub tag: Option<String>,
    /// Raw download location, mutually exclusive with `repo`
    #[serde(rename = "URL", alias = "url", default)]
    pub url: Option<String>,
}

impl SourceEntry {
    /// Creates a repository pin
    pub fn repo(repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repo: Some(repo.into()),
            tag: Some(tag.into()),
            url: None,
        }
    }

    /// Creates a raw URL pin
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            repo: None,
            tag: None,
            url: Some(url.into()),
        }
    }

    /// Repository reference, treating an empty string as unset
    pub fn repo_ref(&self) -> Option<&str> {
        non_empty(&self.repo)
    }

    /// Pinned tag, treating an empty string as unset
    pub fn pinned_tag(&self) -> Option<&str> {
        non_empty(&self.tag)
    }

    /// Raw URL, treating an empty string as unset
    pub fn raw_url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Check the entry invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.repo_ref(), self.raw_url()) {
            (Some(repo), Some(url)) => Err(ValidationError::UrlAndRepo {
                repo: repo.to_string(),
                url: url.to_string(),
            }),
            (Some(repo), None) if self.pinned_tag().is_none() => {
                Err(ValidationError::RepoWithoutTag {
                    repo: repo.to_string(),
                })
            }
            (None, None) => Err(ValidationError::MissingSource),
            _ => Ok(()),
        }
    }

    /// Short label used in output and logs
    pub fn label(&self) -> &str {
        self.repo_ref().or(self.raw_url()).unwrap_or("<empty>")
    }
}

impl fmt::Display for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.repo_ref(), self.pinned_tag(), self.raw_url()) {
            (Some(repo), Some(tag), _) => write!(f, "{}@{}", repo, tag),
            (Some(repo), None, _) => write!(f, "{}", repo),
            (None, _, Some(url)) => write!(f, "{}", url),
            (None, _, None) => write!(f, "<empty>"),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parsed content of one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(rename = "Sources", alias = "sources", default)]
    pub sources: Vec<SourceEntry>,
}

impl Config {
    /// Creates a config from a list of entries
    pub fn new(sources: Vec<SourceEntry>) -> Self {
        Self { sources }
    }

    /// Validate every entry, reporting the first offending position
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (index, entry) in self.sources.iter().enumerate() {
            entry.validate().map_err(|e| e.at(index))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_entry_valid() {
        assert!(SourceEntry::repo("github.com/foo/bar", "1.0.0")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_url_entry_valid() {
        assert!(SourceEntry::url("https://example.com/foo.tar.gz")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_url_and_repo_rejected() {
        let entry = SourceEntry {
            repo: Some("x".to_string()),
            tag: Some("1.0".to_string()),
            url: Some("y".to_string()),
        };
        assert!(matches!(
            entry.validate(),
            Err(ValidationError::UrlAndRepo { .. })
        ));
    }

    #[test]
    fn test_repo_without_tag_rejected() {
        let entry = SourceEntry {
            repo: Some("x".to_string()),
            tag: None,
            url: None,
        };
        assert!(matches!(
            entry.validate(),
            Err(ValidationError::RepoWithoutTag { .. })
        ));

        let entry = SourceEntry {
            repo: Some("x".to_string()),
            tag: Some(String::new()),
            url: None,
        };
        assert!(matches!(
            entry.validate(),
            Err(ValidationError::RepoWithoutTag { .. })
        ));
    }

    #[test]
    fn test_empty_entry_rejected() {
        assert!(matches!(
            SourceEntry::default().validate(),
            Err(ValidationError::MissingSource)
        ));
    }

    #[test]
    fn test_config_validate_reports_index() {
        let config = Config::new(vec![
            SourceEntry::repo("github.com/foo/bar", "1.0"),
            SourceEntry {
                repo: Some("x".to_string()),
                tag: None,
                url: Some("y".to_string()),
            },
        ]);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::Entry { index: 1, .. }));
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_empty_config_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_label_and_display() {
        let entry = SourceEntry::repo("github.com/foo/bar", "1.0");
        assert_eq!(entry.label(), "github.com/foo/bar");
        assert_eq!(entry.to_string(), "github.com/foo/bar@1.0");

        let entry = SourceEntry::url("https://example.com/a.tgz");
        assert_eq!(entry.label(), "https://example.com/a.tgz");
        assert_eq!(entry.to_string(), "https://example.com/a.tgz");
    }
}
