//! Progress display while manifests are being checked
//!
//! Draws to stderr via indicatif so stdout stays clean for results. When
//! disabled every bar is hidden, so callers never branch on the mode.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const SEARCH_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const CHECK_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}";

/// Progress reporter for one check run: a discovery spinner, then a bar
/// advancing once per finished manifest
pub struct CheckProgress {
    enabled: bool,
    bar: ProgressBar,
}

impl CheckProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: ProgressBar::hidden(),
        }
    }

    fn replace(&mut self, bar: ProgressBar, template: &str, message: String) {
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ").progress_chars("█▓░"));
        }
        bar.set_message(message);
        if self.enabled {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
        self.bar.finish_and_clear();
        self.bar = bar;
    }

    /// Spinner shown while the directory tree is walked
    pub fn searching(&mut self, root: &Path) {
        let bar = if self.enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        self.replace(
            bar,
            SEARCH_TEMPLATE,
            format!("Searching {} for SOURCES manifests", root.display()),
        );
    }

    /// Bar counting finished manifests
    pub fn checking(&mut self, manifests: usize) {
        let total = manifests as u64;
        let bar = if self.enabled {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };
        bar.set_length(total);
        self.replace(bar, CHECK_TEMPLATE, "Checking manifests".to_string());
    }

    /// One manifest task has been joined
    pub fn manifest_done(&self) {
        self.bar.inc(1);
    }

    /// Remove whatever is on screen
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
