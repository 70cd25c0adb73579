//! Human approval of synthesized proposals.

mod prompt;

pub use prompt::{ApprovalCommand, ApprovalPrompt, PromptError, parse_command};
