//! Synthesis of the collected proposals.

use super::DebateOrchestrator;
use crate::ports::agent::Agent;
use council_domain::{AgentProposal, AgentRole, DebatePromptTemplate, SpeakingStatus, SynthesisResult};
use std::sync::Arc;
use tracing::{info, warn};

impl DebateOrchestrator {
    /// The orchestrator-role agent, or the first agent if none has the role.
    pub(super) fn synthesizer(&self) -> Option<&Arc<dyn Agent>> {
        self.agents
            .iter()
            .find(|a| a.role() == AgentRole::Orchestrator)
            .or_else(|| self.agents.first())
    }

    /// Merge proposals into one. A single call; if it fails the proposals
    /// are concatenated with attribution instead.
    pub(super) async fn synthesize(
        &self,
        objective: &str,
        proposals: &[AgentProposal],
    ) -> SynthesisResult {
        let merged = match self.synthesizer() {
            Some(agent) => {
                self.speaking(agent.id().clone(), SpeakingStatus::Thinking);
                let prompt = DebatePromptTemplate::synthesis_prompt(objective, proposals);
                match agent.process_message(&prompt).await {
                    Ok(text) => {
                        info!("Agent {} synthesized {} proposals", agent.id(), proposals.len());
                        self.speaking(agent.id().clone(), SpeakingStatus::Done);
                        Some(text)
                    }
                    Err(e) => {
                        warn!("Synthesis by {} failed: {}", agent.id(), e);
                        self.speaking(agent.id().clone(), SpeakingStatus::Failed);
                        self.log(format!("Synthesis failed, concatenating proposals: {}", e));
                        None
                    }
                }
            }
            None => None,
        };

        let hybrid = merged.unwrap_or_else(|| concatenate(proposals));
        SynthesisResult::new(hybrid, proposals, self.agents.len())
    }
}

fn concatenate(proposals: &[AgentProposal]) -> String {
    proposals
        .iter()
        .map(|p| format!("## {} ({})\n\n{}", p.agent_name, p.domain.display_name(), p.proposal))
        .collect::<Vec<_>>()
        .join("\n\n")
}
