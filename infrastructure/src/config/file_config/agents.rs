//! Debate roster from TOML (`[[agents]]` array)

use council_domain::{AgentProfile, AgentRole, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// One configured agent, backed by an external command.
///
/// # Example
///
/// ```toml
/// [[agents]]
/// id = "arch"
/// name = "Architect"
/// role = "architect"
/// command = "llm"
/// args = ["-m", "claude-sonnet"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentEntry {
    pub id: String,
    /// Display name; the id is used when empty
    pub name: String,
    pub role: String,
    /// Program that reads a prompt on stdin and answers on stdout
    pub command: String,
    pub args: Vec<String>,
}

impl FileAgentEntry {
    /// Parse the role, reporting unknown values and falling back to `general`.
    pub fn parse_role(&self, index: usize) -> (AgentRole, Vec<ConfigIssue>) {
        match self.role.parse::<AgentRole>() {
            Ok(role) => (role, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("agents[{}].role", index),
                        value: self.role.clone(),
                        valid_values: [
                            "orchestrator",
                            "architect",
                            "security",
                            "ux",
                            "ai",
                            "implementation",
                            "general",
                        ]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    },
                    format!(
                        "agents[{}].role: unknown value '{}', falling back to 'general'",
                        index, self.role
                    ),
                );
                (AgentRole::General, vec![issue])
            }
        }
    }

    pub fn to_profile(&self) -> AgentProfile {
        let name = if self.name.trim().is_empty() {
            self.id.clone()
        } else {
            self.name.clone()
        };
        AgentProfile::new(
            self.id.as_str(),
            name,
            AgentRole::parse_lenient(&self.role),
        )
    }
}

/// Validate the whole roster: empty fields, unknown roles, duplicate ids.
pub fn validate_agents(agents: &[FileAgentEntry]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (index, agent) in agents.iter().enumerate() {
        if agent.id.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: format!("agents[{}].id", index),
                },
                format!("agents[{}].id: cannot be empty", index),
            ));
        } else if !seen.insert(agent.id.as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateId {
                    id: agent.id.clone(),
                },
                format!("agents[{}].id: '{}' is already used", index, agent.id),
            ));
        }

        if agent.command.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: format!("agents[{}].command", index),
                },
                format!("agents[{}].command: cannot be empty", index),
            ));
        }

        issues.extend(agent.parse_role(index).1);
    }

    issues
}
