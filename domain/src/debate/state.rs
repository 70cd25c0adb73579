//! Debate lifecycle state machine.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebateState {
    #[default]
    Idle,
    ParallelProposals,
    Synthesis,
    AwaitingUserApproval,
    GeneratingCode,
    QcReview,
    Executing,
    Failed,
}

impl DebateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateState::Idle => "IDLE",
            DebateState::ParallelProposals => "PARALLEL_PROPOSALS",
            DebateState::Synthesis => "SYNTHESIS",
            DebateState::AwaitingUserApproval => "AWAITING_USER_APPROVAL",
            DebateState::GeneratingCode => "GENERATING_CODE",
            DebateState::QcReview => "QC_REVIEW",
            DebateState::Executing => "EXECUTING",
            DebateState::Failed => "FAILED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebateState::Idle => "Idle",
            DebateState::ParallelProposals => "Parallel Proposals",
            DebateState::Synthesis => "Synthesis",
            DebateState::AwaitingUserApproval => "Awaiting User Approval",
            DebateState::GeneratingCode => "Generating Code",
            DebateState::QcReview => "QC Review",
            DebateState::Executing => "Executing",
            DebateState::Failed => "Failed",
        }
    }

    /// `Executing` and `Failed` end a debate.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateState::Executing | DebateState::Failed)
    }

    /// Whether the protocol allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: DebateState) -> bool {
        use DebateState::*;

        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }

        matches!(
            (self, next),
            (Idle, ParallelProposals)
                | (ParallelProposals, Synthesis)
                | (Synthesis, AwaitingUserApproval)
                | (AwaitingUserApproval, GeneratingCode)
                | (AwaitingUserApproval, ParallelProposals)
                | (GeneratingCode, QcReview)
                | (GeneratingCode, Executing)
                | (QcReview, GeneratingCode)
        )
    }

    /// Validated transition.
    pub fn transition(self, next: DebateState) -> Result<DebateState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::IllegalTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for DebateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_is_legal() {
        let path = [
            DebateState::Idle,
            DebateState::ParallelProposals,
            DebateState::Synthesis,
            DebateState::AwaitingUserApproval,
            DebateState::GeneratingCode,
            DebateState::QcReview,
            DebateState::GeneratingCode,
            DebateState::Executing,
        ];
        let mut state = path[0];
        for next in &path[1..] {
            state = state.transition(*next).unwrap();
        }
        assert_eq!(state, DebateState::Executing);
    }

    #[test]
    fn test_refinement_restart_is_legal() {
        assert!(DebateState::AwaitingUserApproval.can_transition_to(DebateState::ParallelProposals));
    }

    #[test]
    fn test_any_live_state_can_fail() {
        for state in [
            DebateState::Idle,
            DebateState::ParallelProposals,
            DebateState::Synthesis,
            DebateState::AwaitingUserApproval,
            DebateState::GeneratingCode,
            DebateState::QcReview,
        ] {
            assert!(state.can_transition_to(DebateState::Failed), "{state}");
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!DebateState::Executing.can_transition_to(DebateState::Failed));
        assert!(!DebateState::Failed.can_transition_to(DebateState::ParallelProposals));
        assert!(DebateState::Failed.is_terminal());
    }

    #[test]
    fn test_skipping_approval_is_illegal() {
        let err = DebateState::Synthesis
            .transition(DebateState::GeneratingCode)
            .unwrap_err();
        assert!(err.to_string().contains("SYNTHESIS -> GENERATING_CODE"));
    }

    #[test]
    fn test_state_serializes_screaming_snake() {
        let json = serde_json::to_string(&DebateState::AwaitingUserApproval).unwrap();
        assert_eq!(json, "\"AWAITING_USER_APPROVAL\"");
    }
}
