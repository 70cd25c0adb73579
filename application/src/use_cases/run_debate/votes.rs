//! Advisory vote collection.

use super::DebateOrchestrator;
use crate::ports::agent::Agent;
use council_domain::ConsensusRound;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

impl DebateOrchestrator {
    /// Ask every agent to vote on `proposal` and tally with the majority
    /// rule. Agents whose vote call fails are left out of the tally.
    ///
    /// Advisory only; nothing in the protocol waits on the outcome.
    pub async fn collect_votes(&self, proposal_id: &str, proposal: &str) -> ConsensusRound {
        let mut join_set = JoinSet::new();

        for agent in &self.agents {
            let agent = Arc::clone(agent);
            let proposal_id = proposal_id.to_string();
            let proposal = proposal.to_string();
            join_set.spawn(async move {
                let result = agent.cast_vote(&proposal_id, &proposal).await;
                (agent, result)
            });
        }

        let mut votes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((_, Ok(vote))) => votes.push(vote),
                Ok((agent, Err(e))) => warn!("Agent {} failed to vote: {}", agent.id(), e),
                Err(e) => warn!("Task join error: {}", e),
            }
        }

        let round = ConsensusRound::new(self.round().await, proposal_id, votes);
        info!("Debate {} vote {}", self.id, round.summary());
        round
    }
}
