//! Agent port
//!
//! An agent is one debate participant, usually backed by an LLM call. The
//! protocol only ever sends it a prompt string and reads back text.

use async_trait::async_trait;
use council_domain::{
    AgentId, AgentProfile, AgentRole, DebatePromptTemplate, Task, TaskOutput, Vote,
    parse_review_response,
};
use thiserror::Error;

/// Errors an agent call can produce
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// A debate participant.
///
/// Only [`profile`](Agent::profile) and
/// [`process_message`](Agent::process_message) are required. Voting and task
/// execution default to a single `process_message` call.
#[async_trait]
pub trait Agent: Send + Sync {
    fn profile(&self) -> &AgentProfile;

    /// Send a prompt and get the full reply.
    async fn process_message(&self, prompt: &str) -> Result<String, AgentError>;

    /// Vote on a proposal. Replies without a clear stance become abstentions.
    async fn cast_vote(&self, proposal_id: &str, proposal: &str) -> Result<Vote, AgentError> {
        let reply = self
            .process_message(&DebatePromptTemplate::vote_prompt(proposal))
            .await?;
        let verdict = parse_review_response(&reply);
        Ok(Vote::new(self.id().clone(), proposal_id, verdict, reply))
    }

    async fn execute_task(&self, task: &Task) -> Result<TaskOutput, AgentError> {
        let reply = self.process_message(&task.description).await?;
        Ok(TaskOutput::new(reply))
    }

    fn can_handle(&self, task: &Task) -> bool {
        task.accepts_role(self.role())
    }

    fn id(&self) -> &AgentId {
        &self.profile().id
    }

    fn role(&self) -> AgentRole {
        self.profile().role
    }
}
