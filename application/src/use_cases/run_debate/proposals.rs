//! Parallel proposal collection.

use super::DebateOrchestrator;
use crate::ports::agent::Agent;
use council_domain::{AgentId, AgentProposal, DebateEvent, DebatePromptTemplate, SpeakingStatus};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

impl DebateOrchestrator {
    /// Ask every agent for a proposal concurrently.
    ///
    /// Agents that fail are left out; the result keeps roster order.
    pub(super) async fn collect_proposals(&self, objective: &str) -> Vec<AgentProposal> {
        let mut join_set = JoinSet::new();

        for (index, agent) in self.agents.iter().enumerate() {
            let agent = Arc::clone(agent);
            let prompt = DebatePromptTemplate::proposal_prompt(objective, agent.role().domain());
            self.speaking(agent.id().clone(), SpeakingStatus::Thinking);

            join_set.spawn(async move {
                let result = agent.process_message(&prompt).await;
                (index, agent, result)
            });
        }

        let mut collected = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, agent, Ok(text))) => {
                    info!("Agent {} proposed", agent.id());
                    self.speaking(agent.id().clone(), SpeakingStatus::Done);
                    collected.push((index, AgentProposal::new(agent.profile(), text)));
                }
                Ok((_, agent, Err(e))) => {
                    warn!("Agent {} failed to propose: {}", agent.id(), e);
                    self.speaking(agent.id().clone(), SpeakingStatus::Failed);
                    self.log(format!(
                        "{} did not submit a proposal: {}",
                        agent.profile().name,
                        e
                    ));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        collected.sort_by_key(|(index, _)| *index);
        collected.into_iter().map(|(_, proposal)| proposal).collect()
    }

    pub(super) fn speaking(&self, agent_id: AgentId, status: SpeakingStatus) {
        self.emit(DebateEvent::AgentSpeaking {
            debate_id: self.id,
            agent_id,
            status,
        });
    }
}
