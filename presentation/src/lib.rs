//! Presentation layer for agent-council
//!
//! This crate contains the CLI definition, console rendering of debate
//! events, agent activity indicators and the interactive approval prompt.

pub mod approval;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use approval::{ApprovalCommand, ApprovalPrompt, PromptError};
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleRenderer;
pub use progress::reporter::{ActivityView, NoProgress, ProgressReporter, SimpleProgress};
