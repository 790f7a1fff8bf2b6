//! SOURCES manifest handling
//!
//! This module provides:
//! - Manifest discovery via recursive directory walk
//! - YAML decoding into [`Config`](crate::domain::Config) plus validation

mod detector;
mod loader;

pub use detector::{discover_manifests, is_manifest, MANIFEST_FILENAME};
pub use loader::{load_config, parse_config};
