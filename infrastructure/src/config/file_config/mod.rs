//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! String-typed enums are parsed on demand so that a typo degrades to a
//! warning instead of a load failure.

mod agents;
mod checks;
mod debate;
mod engine;
mod logging;

pub use agents::{FileAgentEntry, validate_agents};
pub use checks::FileChecksConfig;
pub use debate::FileDebateConfig;
pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;

use council_application::EngineConfig;
use council_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate protocol settings
    pub debate: FileDebateConfig,
    /// Task dispatch settings
    pub engine: FileEngineConfig,
    /// Lint / typecheck commands
    pub checks: FileChecksConfig,
    /// Debate roster
    pub agents: Vec<FileAgentEntry>,
    /// Event transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.debate.parse_qc_policy().1);
        issues.extend(self.debate.validate_ranges());
        issues.extend(self.engine.validate());
        issues.extend(validate_agents(&self.agents));

        issues
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_max_concurrency(self.engine.max_concurrency)
            .with_debate(self.debate.to_debate_config())
    }
}
