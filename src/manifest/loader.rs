//! SOURCES manifest decoding and validation

use crate::domain::Config;
use crate::error::ManifestError;
use std::path::Path;

/// Read, decode and validate a manifest file
pub fn load_config(path: &Path) -> Result<Config, ManifestError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    parse_config(&content, path)
}

/// Decode and validate manifest content; `path` is only used for error context
pub fn parse_config(content: &str, path: &Path) -> Result<Config, ManifestError> {
    // An empty document decodes to nothing rather than an empty mapping.
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(content)
        .map_err(|e| ManifestError::yaml_parse_error(path, e.to_string()))?;

    config
        .validate()
        .map_err(|e| ManifestError::invalid(path, e))?;

    Ok(config)
}
