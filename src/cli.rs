//! CLI argument parsing module for pincheck

use crate::registry::{DEFAULT_CONCURRENCY, GITHUB_API_URL};
use clap::Parser;
use std::path::PathBuf;

/// Check pinned sources against their latest upstream release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pincheck",
    version,
    about = "Check SOURCES manifests for outdated repository pins"
)]
pub struct CliArgs {
    /// Root directory to scan for SOURCES manifests (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - only outdated entries and errors are printed
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    // Lookup options
    /// Base URL of the release API
    #[arg(long, env = "PINCHECK_API_URL", default_value = GITHUB_API_URL)]
    pub api_url: String,

    /// Maximum number of release lookups in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    // Policy options
    /// Stop checking a manifest after its first failing entry
    #[arg(long)]
    pub fail_fast: bool,

    /// Exit with status 3 when any pin is outdated
    #[arg(long)]
    pub fail_on_outdated: bool,
}
