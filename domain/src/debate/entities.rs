//! Debate value objects - the artifacts each phase produces.
//!
//! - [`AgentProposal`] - one agent's answer from the proposal phase
//! - [`SynthesisResult`] - the merged hybrid proposal
//! - [`UserApprovalRequest`] - payload offered to the approval gate
//! - [`DebateResult`] - terminal artifact of one debate

use crate::agent::{AgentId, AgentProfile, ProposalDomain};
use crate::change::FileChange;
use crate::core::ids::DebateId;
use crate::core::string::truncate;
use crate::quorum::Vote;
use serde::{Deserialize, Serialize};

/// Proposal written by one agent from its domain's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProposal {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub proposal: String,
    pub domain: ProposalDomain,
}

impl AgentProposal {
    pub fn new(profile: &AgentProfile, proposal: impl Into<String>) -> Self {
        Self {
            agent_id: profile.id.clone(),
            agent_name: profile.name.clone(),
            proposal: proposal.into(),
            domain: profile.role.domain(),
        }
    }
}

/// Unified proposal produced by the orchestrator-role agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub hybrid_proposal: String,
    pub contributing_agents: Vec<AgentId>,
    /// Always within `0.0..=1.0`.
    pub confidence: f64,
}

impl SynthesisResult {
    /// Confidence is the share of the roster whose proposals made it in.
    pub fn new(hybrid_proposal: impl Into<String>, proposals: &[AgentProposal], roster_size: usize) -> Self {
        let confidence = if roster_size == 0 {
            0.0
        } else {
            (proposals.len() as f64 / roster_size as f64).clamp(0.0, 1.0)
        };

        Self {
            hybrid_proposal: hybrid_proposal.into(),
            contributing_agents: proposals.iter().map(|p| p.agent_id.clone()).collect(),
            confidence,
        }
    }
}

/// Everything the approver needs to decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserApprovalRequest {
    pub debate_id: DebateId,
    pub round: usize,
    pub proposals: Vec<AgentProposal>,
    pub synthesis: SynthesisResult,
    pub debate_summary: String,
}

impl UserApprovalRequest {
    pub fn new(
        debate_id: DebateId,
        round: usize,
        objective: &str,
        proposals: Vec<AgentProposal>,
        synthesis: SynthesisResult,
    ) -> Self {
        let debate_summary = Self::summarize(round, objective, &proposals, &synthesis);
        Self {
            debate_id,
            round,
            proposals,
            synthesis,
            debate_summary,
        }
    }

    fn summarize(
        round: usize,
        objective: &str,
        proposals: &[AgentProposal],
        synthesis: &SynthesisResult,
    ) -> String {
        let participants = proposals
            .iter()
            .map(|p| format!("{} [{}]", p.agent_name, p.domain))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Round {}: {} proposal(s) for \"{}\" from {}. Synthesis confidence {:.0}%.",
            round,
            proposals.len(),
            truncate(objective, 120),
            participants,
            synthesis.confidence * 100.0
        )
    }
}

/// Terminal artifact of a debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateResult {
    pub success: bool,
    pub proposal: String,
    pub file_changes: Vec<FileChange>,
    /// Empty on the protocol's main path; kept for the advisory vote signal.
    pub votes: Vec<Vote>,
    /// `true` when the change set came from the deterministic scaffold
    /// because the generated code failed the quality gate.
    #[serde(default)]
    pub scaffolded: bool,
}

impl DebateResult {
    pub fn success(proposal: impl Into<String>, file_changes: Vec<FileChange>, scaffolded: bool) -> Self {
        Self {
            success: true,
            proposal: proposal.into(),
            file_changes,
            votes: Vec::new(),
            scaffolded,
        }
    }

    /// Well-formed empty result emitted on timeouts and errors so that
    /// consumers waiting for `file_changes` never block.
    pub fn empty() -> Self {
        Self {
            success: false,
            proposal: String::new(),
            file_changes: Vec::new(),
            votes: Vec::new(),
            scaffolded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRole;

    fn proposal(id: &str, role: AgentRole) -> AgentProposal {
        AgentProposal::new(&AgentProfile::new(id, id.to_uppercase(), role), "text")
    }

    #[test]
    fn test_proposal_takes_domain_from_role() {
        let p = proposal("a", AgentRole::Security);
        assert_eq!(p.domain, ProposalDomain::Security);
        assert_eq!(p.agent_name, "A");
    }

    #[test]
    fn test_synthesis_confidence_is_participation_ratio() {
        let proposals = vec![proposal("a", AgentRole::Ux), proposal("b", AgentRole::Ai)];
        let synthesis = SynthesisResult::new("merged", &proposals, 4);
        assert_eq!(synthesis.confidence, 0.5);
        assert_eq!(synthesis.contributing_agents.len(), 2);
    }

    #[test]
    fn test_synthesis_confidence_with_empty_roster() {
        let synthesis = SynthesisResult::new("merged", &[], 0);
        assert_eq!(synthesis.confidence, 0.0);
    }

    #[test]
    fn test_approval_request_summary_mentions_participants() {
        let proposals = vec![proposal("arch", AgentRole::Architect)];
        let synthesis = SynthesisResult::new("merged", &proposals, 1);
        let request =
            UserApprovalRequest::new(DebateId::new(), 2, "Add login", proposals, synthesis);
        assert!(request.debate_summary.starts_with("Round 2"));
        assert!(request.debate_summary.contains("ARCH [architecture]"));
        assert!(request.debate_summary.contains("100%"));
    }

    #[test]
    fn test_empty_result_shape() {
        let result = DebateResult::empty();
        assert!(!result.success);
        assert!(result.file_changes.is_empty());
        assert!(result.votes.is_empty());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(DebateResult::empty()).unwrap();
        assert!(json.get("fileChanges").is_some());
        assert!(json.get("file_changes").is_none());
    }
}
