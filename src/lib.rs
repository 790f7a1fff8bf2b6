//! pincheck - pinned source currency checker library
//!
//! Finds every `SOURCES` manifest under a directory, and for each pinned
//! repository entry asks the release API for the latest published release:
//! - Repository pins are compared against the latest release name
//! - Raw URL pins are reported as uncheckable
//! - Problems are collected per entry and per manifest

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod registry;
