//! One round of advisory voting on a proposal.

use super::vote::{Vote, VoteResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusOutcome {
    Approved,
    Rejected,
    /// Nobody voted.
    NoVotes,
}

impl ConsensusOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, ConsensusOutcome::Approved)
    }
}

impl std::fmt::Display for ConsensusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusOutcome::Approved => write!(f, "Approved"),
            ConsensusOutcome::Rejected => write!(f, "Rejected"),
            ConsensusOutcome::NoVotes => write!(f, "No votes"),
        }
    }
}

/// Votes collected for one proposal in one debate round.
///
/// ```
/// use council_domain::quorum::{ConsensusRound, Vote};
///
/// let round = ConsensusRound::new(1, "p", vec![
///     Vote::approve("architect", "p", "sound"),
///     Vote::approve("ux", "p", "usable"),
///     Vote::reject("security", "p", "needs auth"),
/// ]);
/// assert!(round.is_approved());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusRound {
    pub round: usize,
    pub proposal_id: String,
    pub outcome: ConsensusOutcome,
    pub result: VoteResult,
}

impl ConsensusRound {
    /// Tally `votes` with the strict majority rule.
    pub fn new(round: usize, proposal_id: impl Into<String>, votes: Vec<Vote>) -> Self {
        let result = VoteResult::from_votes(votes);
        let outcome = if result.total_votes == 0 {
            ConsensusOutcome::NoVotes
        } else if result.passed {
            ConsensusOutcome::Approved
        } else {
            ConsensusOutcome::Rejected
        };

        Self {
            round,
            proposal_id: proposal_id.into(),
            outcome,
            result,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.outcome.is_approved()
    }

    pub fn votes(&self) -> &[Vote] {
        &self.result.votes
    }

    /// One line for logs, e.g. `round 1: Approved [●●○] 2/3`.
    pub fn summary(&self) -> String {
        format!(
            "round {}: {} {} {}/{}",
            self.round,
            self.outcome,
            self.result.vote_summary(),
            self.result.approve_count,
            self.result.total_votes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_outcomes() {
        let approved = ConsensusRound::new(
            1,
            "p",
            vec![Vote::approve("a", "p", ""), Vote::approve("b", "p", "")],
        );
        assert_eq!(approved.outcome, ConsensusOutcome::Approved);

        let rejected = ConsensusRound::new(
            2,
            "p",
            vec![Vote::approve("a", "p", ""), Vote::reject("b", "p", "")],
        );
        assert_eq!(rejected.outcome, ConsensusOutcome::Rejected);

        let empty = ConsensusRound::new(3, "p", Vec::new());
        assert_eq!(empty.outcome, ConsensusOutcome::NoVotes);
        assert!(!empty.is_approved());
    }

    #[test]
    fn test_summary_line() {
        let round = ConsensusRound::new(
            1,
            "p",
            vec![
                Vote::approve("a", "p", ""),
                Vote::approve("b", "p", ""),
                Vote::reject("c", "p", ""),
            ],
        );
        assert_eq!(round.summary(), "round 1: Approved [●●○] 2/3");
        assert_eq!(round.votes().len(), 3);
    }
}
