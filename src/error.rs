//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, decoding or validating a SOURCES file
//! - VersionError: Tags without a usable numeric version
//! - RepoRefError: Malformed repository references
//! - LookupError: Issues talking to the release API
//! - IoError: File system operation failures

use crate::domain::REPO_HOST;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Release API related errors
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Repository reference errors
    #[error(transparent)]
    RepoRef(#[from] RepoRefError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to loading a manifest file
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid YAML of the expected shape
    #[error("invalid yaml in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },

    /// Document decoded but violates entry invariants
    #[error("invalid config in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Source entry invariant violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Both a repository and a raw URL were declared
    #[error("cannot define a url and a repo; pick one (repo '{repo}', url '{url}')")]
    UrlAndRepo { repo: String, url: String },

    /// A repository was declared without a tag to pull
    #[error("when defining a repo you must also define a tag to pull (repo '{repo}')")]
    RepoWithoutTag { repo: String },

    /// Neither a repository nor a raw URL was declared
    #[error("entry defines neither a repo nor a url")]
    MissingSource,

    /// Wraps another violation with the entry position
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Errors produced while extracting or comparing version vectors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// No digit anywhere in the tag
    #[error("could not parse '{tag}' as semver: no numeric component")]
    NoDigits { tag: String },

    /// A captured component is negative
    #[error("could not parse '{tag}' as semver: component '{component}' is < 0")]
    Negative { tag: String, component: String },

    /// A captured component does not fit a non-negative integer
    #[error("could not parse '{tag}' as semver: component '{component}': {message}")]
    Malformed {
        tag: String,
        component: String,
        message: String,
    },

    /// One or both sides of a comparison failed to parse
    #[error("error comparing '{left}' with '{right}': {detail}")]
    Compare {
        left: String,
        right: String,
        detail: String,
    },
}

/// A repository reference that is not `github.com/<owner>/<project>`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "could not parse repo '{reference}': expected {host}/<owner>/<project>",
    host = REPO_HOST
)]
pub struct RepoRefError {
    pub reference: String,
}

/// Errors related to release API communication
#[derive(Error, Debug)]
pub enum LookupError {
    /// Repository or its latest release does not exist
    #[error("no published release found for '{repo}'")]
    NotFound { repo: String },

    /// Transport failure or unexpected HTTP status
    #[error("there was an error retrieving the latest release for '{repo}': {message}")]
    Network { repo: String, message: String },

    /// Rate limit exceeded after retries
    #[error("rate limit exceeded while fetching '{repo}'")]
    RateLimited { repo: String },

    /// Body could not be read or is not the expected JSON object
    #[error("invalid release response for '{repo}': {message}")]
    InvalidResponse { repo: String, message: String },

    /// Request timed out
    #[error("timeout while fetching latest release for '{repo}'")]
    Timeout { repo: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Invalid error
    pub fn invalid(path: impl Into<PathBuf>, source: ValidationError) -> Self {
        ManifestError::Invalid {
            path: path.into(),
            source,
        }
    }
}

impl ValidationError {
    /// Attach the position of the offending entry
    pub fn at(self, index: usize) -> Self {
        ValidationError::Entry {
            index,
            source: Box::new(self),
        }
    }
}

impl VersionError {
    pub fn no_digits(tag: impl Into<String>) -> Self {
        VersionError::NoDigits { tag: tag.into() }
    }

    pub fn negative(tag: impl Into<String>, component: impl Into<String>) -> Self {
        VersionError::Negative {
            tag: tag.into(),
            component: component.into(),
        }
    }

    pub fn malformed(
        tag: impl Into<String>,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        VersionError::Malformed {
            tag: tag.into(),
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn compare(
        left: impl Into<String>,
        right: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        VersionError::Compare {
            left: left.into(),
            right: right.into(),
            detail: detail.into(),
        }
    }
}

impl RepoRefError {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl LookupError {
    /// Creates a new NotFound error
    pub fn not_found(repo: impl Into<String>) -> Self {
        LookupError::NotFound { repo: repo.into() }
    }

    /// Creates a new Network error
    pub fn network(repo: impl Into<String>, message: impl Into<String>) -> Self {
        LookupError::Network {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimited error
    pub fn rate_limited(repo: impl Into<String>) -> Self {
        LookupError::RateLimited { repo: repo.into() }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(repo: impl Into<String>, message: impl Into<String>) -> Self {
        LookupError::InvalidResponse {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(repo: impl Into<String>) -> Self {
        LookupError::Timeout { repo: repo.into() }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
