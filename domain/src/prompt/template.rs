//! Prompt templates for the debate protocol
//!
//! Agents receive a single prompt string, so any role framing is folded
//! into the text itself.

use crate::agent::ProposalDomain;
use crate::debate::entities::AgentProposal;

/// Templates for generating prompts at each phase
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Framing for a proposal written from one domain's perspective
    pub fn domain_focus(domain: ProposalDomain) -> &'static str {
        match domain {
            ProposalDomain::Architecture => {
                "Focus on system structure: module boundaries, data flow, interfaces and how the change fits the existing design."
            }
            ProposalDomain::Security => {
                "Focus on security: input validation, authentication and authorization, secret handling and abuse cases."
            }
            ProposalDomain::Ux => {
                "Focus on the user experience: flows, error states, accessibility and what the user sees at each step."
            }
            ProposalDomain::Ai => {
                "Focus on AI/ML concerns: model usage, prompt design, evaluation and failure modes of generated output."
            }
            ProposalDomain::Implementation => {
                "Focus on implementation: concrete files, functions and the order in which to build them."
            }
            ProposalDomain::General => {
                "Give a balanced proposal covering design, risks and implementation steps."
            }
        }
    }

    /// Proposal phase prompt
    pub fn proposal_prompt(objective: &str, domain: ProposalDomain) -> String {
        format!(
            r#"You are the {} expert in a multi-agent design debate.
{}

Objective:
{}

Write a concise proposal (at most a few hundred words) describing how you would achieve the objective."#,
            domain.display_name(),
            Self::domain_focus(domain),
            objective
        )
    }

    /// Synthesis prompt with every proposal attributed to its author
    pub fn synthesis_prompt(objective: &str, proposals: &[AgentProposal]) -> String {
        let mut prompt = format!(
            r#"You are moderating a design debate. Merge the expert proposals below into one hybrid proposal.

Objective:
{}

Proposals:
"#,
            objective
        );

        for proposal in proposals {
            prompt.push_str(&format!(
                "\n--- {} ({}) ---\n{}\n",
                proposal.agent_name,
                proposal.domain.display_name(),
                proposal.proposal
            ));
        }

        prompt.push_str(
            r#"
Keep the strongest points of each proposal, resolve conflicts explicitly and
produce a single actionable plan with clear markdown headers."#,
        );

        prompt
    }

    /// Objective for the next round after the approver asked for changes
    pub fn refinement_objective(objective: &str, feedback: &str) -> String {
        format!(
            "{}\n\nThe previous proposal was not approved. Reviewer feedback to address:\n{}",
            objective,
            feedback.trim()
        )
    }

    /// Code generation prompt for the implementation agent
    pub fn implementation_prompt(objective: &str, approved_proposal: &str) -> String {
        format!(
            r#"Implement the approved proposal below.

Objective:
{}

Approved proposal:
{}

Respond with ONLY a JSON array of file changes, no prose:
[{{"path": "relative/path.ext", "action": "create" | "update" | "delete", "content": "full file content"}}]

Write complete, working code. Do not leave TODOs, stubs or placeholder values."#,
            objective, approved_proposal
        )
    }

    /// Quality review prompt for one agent's domain
    pub fn review_prompt(domain: ProposalDomain, objective: &str, approved_proposal: &str) -> String {
        format!(
            r#"Review this approved proposal from the {} perspective.
{}

Objective:
{}

Proposal:
{}

Reply with APPROVED if it is ready to ship, otherwise give a score from 1 to 10 as "Score: N" followed by your concerns."#,
            domain.display_name(),
            Self::domain_focus(domain),
            objective,
            approved_proposal
        )
    }

    /// Vote prompt for the advisory consensus path
    pub fn vote_prompt(proposal: &str) -> String {
        format!(
            r#"Vote on the following proposal.

{}

Answer with APPROVE, REJECT or ABSTAIN on the first line, then a short justification."#,
            proposal
        )
    }
}
