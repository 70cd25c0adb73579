//! Engine configuration from TOML (`[engine]` section)

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw engine configuration from TOML
///
/// ```toml
/// [engine]
/// max_concurrency = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Tasks dispatched per batch
    pub max_concurrency: usize,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self { max_concurrency: 5 }
    }
}

impl FileEngineConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_concurrency == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "engine.max_concurrency".to_string(),
                },
                "engine.max_concurrency: must be at least 1",
            )]
        } else {
            vec![]
        }
    }
}
