//! Application layer for agent-council
//!
//! This crate contains the debate orchestrator, the task dispatch engine,
//! port definitions and application configuration. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateConfig, EngineConfig, QcPolicy};
pub use ports::{
    agent::{Agent, AgentError},
    code_check::{CheckError, CheckReport, CodeCheckPort, SkipCheck},
    event_logger::{EventLogger, NoEventLogger},
    file_reader::{FileReaderPort, NoFileReader},
};
pub use use_cases::approval_gate::{ApprovalDecision, ApprovalGate, GateOutcome};
pub use use_cases::dispatch_engine::TaskDispatchEngine;
pub use use_cases::run_debate::{DebateCollaborators, DebateError, DebateOrchestrator, QcReport};
