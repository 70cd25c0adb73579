//! Debate protocol configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when quality review fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcPolicy {
    /// Log the failure and continue to execution.
    #[default]
    WarnOnly,
    /// Fail the debate.
    Block,
}

impl QcPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcPolicy::WarnOnly => "warn_only",
            QcPolicy::Block => "block",
        }
    }
}

impl std::fmt::Display for QcPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QcPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "warn_only" | "warn" => Ok(QcPolicy::WarnOnly),
            "block" => Ok(QcPolicy::Block),
            _ => Err(format!("Unknown QC policy: {}. Valid: warn_only, block", s)),
        }
    }
}

/// Controls a single debate run.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateConfig {
    /// How long to wait for `approve` / `request_refinement`.
    pub approval_timeout: Duration,
    /// Rounds allowed before refinement fails the debate; round 1 is the
    /// initial proposal round.
    pub max_rounds: usize,
    pub qc_policy: QcPolicy,
    /// Share of reviewing agents that must pass the proposal.
    pub review_pass_ratio: f64,
    /// Minimum score that counts as a pass in agent review.
    pub review_pass_score: f64,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            approval_timeout: Duration::from_secs(7 * 60),
            max_rounds: 3,
            qc_policy: QcPolicy::default(),
            review_pass_ratio: 0.7,
            review_pass_score: 7.0,
        }
    }
}

impl DebateConfig {
    pub fn with_approval_timeout(mut self, timeout: Duration) -> Self {
        self.approval_timeout = timeout;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_qc_policy(mut self, policy: QcPolicy) -> Self {
        self.qc_policy = policy;
        self
    }
}
