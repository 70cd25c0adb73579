//! Events a debate emits, in the order they happen.
//!
//! Each phase transition produces at most one `state-change`. The wire names
//! are fixed because external listeners (UI bridges, transcripts) match on
//! them.

use super::entities::{DebateResult, UserApprovalRequest};
use super::state::DebateState;
use crate::agent::AgentId;
use crate::core::ids::DebateId;
use serde::{Deserialize, Serialize};

/// What an agent is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakingStatus {
    Thinking,
    Done,
    Failed,
}

/// Protocol event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DebateEvent {
    #[serde(rename = "log")]
    Log { debate_id: DebateId, message: String },

    #[serde(rename = "state-change")]
    StateChange {
        debate_id: DebateId,
        state: DebateState,
        round: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    #[serde(rename = "agent-speaking")]
    AgentSpeaking {
        debate_id: DebateId,
        agent_id: AgentId,
        status: SpeakingStatus,
    },

    #[serde(rename = "user_approval_required")]
    UserApprovalRequired(UserApprovalRequest),

    #[serde(rename = "file_changes")]
    FileChanges {
        debate_id: DebateId,
        result: DebateResult,
    },
}

impl DebateEvent {
    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            DebateEvent::Log { .. } => "log",
            DebateEvent::StateChange { .. } => "state-change",
            DebateEvent::AgentSpeaking { .. } => "agent-speaking",
            DebateEvent::UserApprovalRequired(_) => "user_approval_required",
            DebateEvent::FileChanges { .. } => "file_changes",
        }
    }

    pub fn debate_id(&self) -> DebateId {
        match self {
            DebateEvent::Log { debate_id, .. }
            | DebateEvent::StateChange { debate_id, .. }
            | DebateEvent::AgentSpeaking { debate_id, .. }
            | DebateEvent::FileChanges { debate_id, .. } => *debate_id,
            DebateEvent::UserApprovalRequired(request) => request.debate_id,
        }
    }
}
