//! Infrastructure layer for agent-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod agent;
pub mod checks;
pub mod config;
pub mod fs;
pub mod logging;

// Re-export commonly used types
pub use agent::ProcessAgent;
pub use checks::ShellCodeCheck;
pub use config::{
    ConfigError, ConfigLoader, FileAgentEntry, FileChecksConfig, FileConfig, FileDebateConfig,
    FileEngineConfig, FileLoggingConfig,
};
pub use fs::LocalFileReader;
pub use logging::JsonlEventLogger;
