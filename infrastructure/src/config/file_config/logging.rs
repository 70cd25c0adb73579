//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// event_log = "~/.local/share/agent-council/events.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of debate events; disabled when unset
    pub event_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Event log path with a leading `~` expanded to the home directory.
    pub fn resolved_event_log(&self) -> Option<PathBuf> {
        let path = self.event_log.as_ref()?;
        match path.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(path.clone()),
        }
    }
}
