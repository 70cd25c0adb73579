//! Task and execution result entities.

use crate::agent::{AgentId, AgentRole};
use crate::core::ids::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Start a new debate; the description is the objective.
    DebateInit,
    /// Hand the description to a single capable agent.
    Generic,
}

/// A unit of work submitted to the dispatch engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    pub description: String,
    /// Restricts generic tasks to agents with this role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<AgentRole>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Task {
    pub fn new(kind: TaskKind, description: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            kind,
            description: description.into(),
            required_role: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn debate_init(objective: impl Into<String>) -> Self {
        Self::new(TaskKind::DebateInit, objective)
    }

    pub fn generic(description: impl Into<String>) -> Self {
        Self::new(TaskKind::Generic, description)
    }

    pub fn with_required_role(mut self, role: AgentRole) -> Self {
        self.required_role = Some(role);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether an agent with `role` may take this task.
    pub fn accepts_role(&self, role: AgentRole) -> bool {
        self.required_role.is_none_or(|required| required == role)
    }
}

/// What an agent returns for a generic task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub content: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl TaskOutput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Outcome of one dispatched task, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub task_id: TaskId,
    pub agent_id: Option<AgentId>,
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl ExecutionResult {
    pub fn succeeded(
        task_id: TaskId,
        agent_id: Option<AgentId>,
        output: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            task_id,
            agent_id,
            success: true,
            output: output.into(),
            error: None,
            duration_ms,
        }
    }

    pub fn failed(
        task_id: TaskId,
        agent_id: Option<AgentId>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            task_id,
            agent_id,
            success: false,
            output: String::new(),
            error: Some(error.into()),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_filter() {
        let open = Task::generic("summarize");
        assert!(open.accepts_role(AgentRole::Ux));

        let scoped = Task::generic("audit").with_required_role(AgentRole::Security);
        assert!(scoped.accepts_role(AgentRole::Security));
        assert!(!scoped.accepts_role(AgentRole::Architect));
    }

    #[test]
    fn test_task_kind_serde() {
        let task = Task::debate_init("Add login").with_metadata("source", "cli");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["kind"], "debate_init");
        assert_eq!(json["metadata"]["source"], "cli");
        assert!(json.get("required_role").is_none());
    }

    #[test]
    fn test_failed_result_shape() {
        let result = ExecutionResult::failed(TaskId::new(), None, "no capable agent", 0);
        assert!(!result.success);
        assert!(result.output.is_empty());
        assert_eq!(result.error.as_deref(), Some("no capable agent"));
    }
}
