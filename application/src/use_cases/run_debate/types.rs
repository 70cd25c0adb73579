//! Types shared by the debate phases.

use crate::ports::agent::AgentError;
use crate::ports::code_check::{CheckReport, CodeCheckPort, SkipCheck};
use crate::ports::file_reader::{FileReaderPort, NoFileReader};
use council_domain::DomainError;
use std::sync::Arc;
use thiserror::Error;

/// Why a debate ended in `FAILED`. The display string is the reported reason.
#[derive(Error, Debug)]
pub enum DebateError {
    #[error("no agents registered")]
    NoAgents,

    #[error("invalid objective: {0}")]
    InvalidObjective(String),

    #[error("no proposals were collected")]
    NoProposals,

    #[error("approval timed out after {0}s")]
    ApprovalTimeout(u64),

    #[error("maximum rounds ({0}) reached")]
    MaxRoundsReached(usize),

    #[error("quality review failed: {0}")]
    QualityReviewFailed(String),

    #[error("debate cancelled")]
    Cancelled,

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl DebateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DebateError::Cancelled)
    }

    /// Timeouts and unexpected errors publish an empty result so listeners
    /// waiting for `file_changes` are released.
    pub fn emits_empty_result(&self) -> bool {
        matches!(
            self,
            DebateError::ApprovalTimeout(_)
                | DebateError::Cancelled
                | DebateError::Agent(_)
                | DebateError::Domain(_)
        )
    }
}

/// External services a debate calls besides its agents.
#[derive(Clone)]
pub struct DebateCollaborators {
    pub file_reader: Arc<dyn FileReaderPort>,
    pub lint: Arc<dyn CodeCheckPort>,
    pub typecheck: Arc<dyn CodeCheckPort>,
}

impl Default for DebateCollaborators {
    fn default() -> Self {
        Self {
            file_reader: Arc::new(NoFileReader),
            lint: Arc::new(SkipCheck::new("lint")),
            typecheck: Arc::new(SkipCheck::new("typecheck")),
        }
    }
}

impl DebateCollaborators {
    pub fn with_file_reader(mut self, reader: Arc<dyn FileReaderPort>) -> Self {
        self.file_reader = reader;
        self
    }

    pub fn with_lint(mut self, lint: Arc<dyn CodeCheckPort>) -> Self {
        self.lint = lint;
        self
    }

    pub fn with_typecheck(mut self, typecheck: Arc<dyn CodeCheckPort>) -> Self {
        self.typecheck = typecheck;
        self
    }
}

/// Result of the QC review phase.
#[derive(Debug, Clone)]
pub struct QcReport {
    pub lint: CheckReport,
    pub typecheck: CheckReport,
    pub approvals: usize,
    pub reviewers: usize,
    pub required_ratio: f64,
}

impl QcReport {
    pub fn automated_passed(&self) -> bool {
        self.lint.passed
            && self.typecheck.passed
            && self.lint.error_count == 0
            && self.typecheck.error_count == 0
    }

    pub fn agents_passed(&self) -> bool {
        self.reviewers == 0 || self.approvals as f64 / self.reviewers as f64 >= self.required_ratio
    }

    pub fn passed(&self) -> bool {
        self.automated_passed() && self.agents_passed()
    }

    pub fn summary(&self) -> String {
        format!(
            "lint {} ({} errors), typecheck {} ({} errors), agent review {}/{} passed",
            if self.lint.passed { "ok" } else { "failed" },
            self.lint.error_count,
            if self.typecheck.passed { "ok" } else { "failed" },
            self.typecheck.error_count,
            self.approvals,
            self.reviewers
        )
    }
}
