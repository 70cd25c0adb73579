//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents registered for the debate")]
    NoAgents,

    #[error("Illegal debate transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Invalid objective: {0}")]
    InvalidObjective(String),

    #[error("Unknown file action: {0}")]
    UnknownFileAction(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
