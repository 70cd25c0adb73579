//! Agent votes and their aggregation.

use crate::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Stance an agent takes on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approve,
    Reject,
    Abstain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approve => "approve",
            Verdict::Reject => "reject",
            Verdict::Abstain => "abstain",
        }
    }

    fn symbol(&self) -> char {
        match self {
            Verdict::Approve => '●',
            Verdict::Reject => '○',
            Verdict::Abstain => '·',
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single agent's vote on a proposal.
///
/// # Example
///
/// ```
/// use council_domain::quorum::{Verdict, Vote};
///
/// let vote = Vote::approve("security", "proposal-1", "No injection risk.");
/// assert_eq!(vote.verdict, Verdict::Approve);
/// assert_eq!(vote.weight, 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub agent_id: AgentId,
    pub proposal_id: String,
    pub verdict: Verdict,
    pub reasoning: String,
    /// Carried for callers that want weighted tallies; the majority rule
    /// counts heads.
    pub weight: f64,
}

impl Vote {
    pub fn new(
        agent_id: impl Into<AgentId>,
        proposal_id: impl Into<String>,
        verdict: Verdict,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            proposal_id: proposal_id.into(),
            verdict,
            reasoning: reasoning.into(),
            weight: 1.0,
        }
    }

    pub fn approve(
        agent_id: impl Into<AgentId>,
        proposal_id: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self::new(agent_id, proposal_id, Verdict::Approve, reasoning)
    }

    pub fn reject(
        agent_id: impl Into<AgentId>,
        proposal_id: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self::new(agent_id, proposal_id, Verdict::Reject, reasoning)
    }

    pub fn abstain(
        agent_id: impl Into<AgentId>,
        proposal_id: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self::new(agent_id, proposal_id, Verdict::Abstain, reasoning)
    }

    /// Weight is kept non-negative.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    pub fn is_approval(&self) -> bool {
        self.verdict == Verdict::Approve
    }
}

/// Aggregated outcome of a set of votes.
///
/// Abstentions count toward `total_votes` but never toward approvals, so an
/// abstaining agent makes a majority harder to reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResult {
    pub passed: bool,
    pub approve_count: usize,
    pub reject_count: usize,
    pub abstain_count: usize,
    pub total_votes: usize,
    pub votes: Vec<Vote>,
}

impl VoteResult {
    /// Aggregate with the majority rule.
    pub fn from_votes(votes: Vec<Vote>) -> Self {
        let approve_count = count(&votes, Verdict::Approve);
        let reject_count = count(&votes, Verdict::Reject);
        let abstain_count = count(&votes, Verdict::Abstain);
        let total_votes = votes.len();

        Self {
            passed: is_consensus_approved(&votes),
            approve_count,
            reject_count,
            abstain_count,
            total_votes,
            votes,
        }
    }

    pub fn is_unanimous(&self) -> bool {
        self.total_votes > 0
            && (self.approve_count == self.total_votes || self.reject_count == self.total_votes)
    }

    pub fn approval_ratio(&self) -> f64 {
        if self.total_votes == 0 {
            0.0
        } else {
            self.approve_count as f64 / self.total_votes as f64
        }
    }

    /// Visual summary such as `[●●○·]`.
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for vote in &self.votes {
            summary.push(vote.verdict.symbol());
        }
        summary.push(']');
        summary
    }

    pub fn rejections(&self) -> impl Iterator<Item = &Vote> {
        self.votes.iter().filter(|v| v.verdict == Verdict::Reject)
    }

    pub fn aggregate_rejection_feedback(&self) -> String {
        self.rejections()
            .map(|v| format!("{}: {}", v.agent_id, v.reasoning))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn count(votes: &[Vote], verdict: Verdict) -> usize {
    votes.iter().filter(|v| v.verdict == verdict).count()
}

/// Majority consensus over a vote set: approvals must exceed half the votes
/// cast. Ties and empty sets are not approved.
pub fn is_consensus_approved(votes: &[Vote]) -> bool {
    count(votes, Verdict::Approve) * 2 > votes.len()
}
