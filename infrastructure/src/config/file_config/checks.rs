//! Automated code check configuration (`[checks]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shell commands run against generated changes during quality review.
///
/// ```toml
/// [checks]
/// lint = "cargo clippy --quiet"
/// typecheck = "cargo check --quiet"
/// working_dir = "."
/// timeout_secs = 120
/// ```
///
/// An unset command skips that check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChecksConfig {
    pub lint: Option<String>,
    pub typecheck: Option<String>,
    /// Directory commands run in and relative paths resolve against
    pub working_dir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for FileChecksConfig {
    fn default() -> Self {
        Self {
            lint: None,
            typecheck: None,
            working_dir: None,
            timeout_secs: 120,
        }
    }
}

impl FileChecksConfig {
    /// Working directory, defaulting to the current one.
    pub fn resolved_working_dir(&self) -> PathBuf {
        self.working_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
