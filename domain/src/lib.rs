//! Domain layer for agent-council
//!
//! This crate contains the debate protocol's entities, value objects and
//! pure functions. It has no dependencies on infrastructure or presentation
//! concerns, and nothing in here performs I/O.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! One run of the propose → synthesize → approve → generate → review protocol
//! for a single objective. Its lifecycle is modelled by [`DebateState`].
//!
//! ## Change extraction
//!
//! Model output is unreliable free text. [`change::repair`] turns it into
//! [`FileChange`]s through a staged fallback pipeline, and
//! [`change::quality::validate`] rejects stub-like generated code.
//!
//! ## Quorum
//!
//! Advisory majority voting over agent [`Vote`]s. Votes are heuristics over
//! untrusted text generators, not an agreement protocol.

pub mod agent;
pub mod change;
pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod quorum;
pub mod task;

// Re-export commonly used types
pub use agent::{AgentId, AgentProfile, AgentRole, ProposalDomain};
pub use change::{
    FileAction, FileChange, QualityVerdict, RepairOutcome, RepairStage, repair,
    repair_with_objective,
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    ids::{DebateId, TaskId},
};
pub use debate::{
    entities::{AgentProposal, DebateResult, SynthesisResult, UserApprovalRequest},
    event::{DebateEvent, SpeakingStatus},
    state::DebateState,
};
pub use prompt::DebatePromptTemplate;
pub use quorum::{
    ConsensusOutcome, ConsensusRound, Verdict, Vote, VoteResult, is_consensus_approved,
    parse_review_pass, parse_review_response,
};
pub use task::{ExecutionResult, Task, TaskKind, TaskOutput};
