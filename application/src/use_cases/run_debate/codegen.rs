//! Code generation and change resolution.

use super::DebateOrchestrator;
use super::types::DebateError;
use crate::ports::agent::Agent;
use council_domain::change::{scaffold, validate};
use council_domain::{
    AgentRole, DebatePromptTemplate, FileAction, FileChange, RepairStage, SpeakingStatus,
    repair_with_objective,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

impl DebateOrchestrator {
    /// The implementation-role agent, or the last agent if none has the role.
    pub(super) fn implementer(&self) -> Option<&Arc<dyn Agent>> {
        self.agents
            .iter()
            .find(|a| a.role() == AgentRole::Implementation)
            .or_else(|| self.agents.last())
    }

    /// Ask the implementer for changes, repair its output and gate it.
    ///
    /// Returns the change set and whether it came from the scaffold.
    pub(super) async fn generate_code(
        &self,
        objective: &str,
        proposal: &str,
    ) -> Result<(Vec<FileChange>, bool), DebateError> {
        let agent = self.implementer().ok_or(DebateError::NoAgents)?;

        self.speaking(agent.id().clone(), SpeakingStatus::Thinking);
        let prompt = DebatePromptTemplate::implementation_prompt(objective, proposal);
        let raw = match agent.process_message(&prompt).await {
            Ok(raw) => {
                self.speaking(agent.id().clone(), SpeakingStatus::Done);
                raw
            }
            Err(e) => {
                self.speaking(agent.id().clone(), SpeakingStatus::Failed);
                return Err(e.into());
            }
        };

        let outcome = repair_with_objective(&raw, objective);
        info!(
            "Debate {}: extracted {} change(s) via {} stage",
            self.id,
            outcome.changes.len(),
            outcome.stage
        );
        if outcome.stage != RepairStage::Json {
            self.log(format!(
                "Implementation output needed repair ({} stage)",
                outcome.stage
            ));
        }

        let verdict = validate(&outcome.changes);
        if verdict.ok {
            return Ok((outcome.changes, false));
        }

        let reason = verdict.reason.unwrap_or_default();
        warn!(
            "Debate {}: generated code rejected by quality gate: {}",
            self.id, reason
        );
        self.log(format!(
            "Generated code rejected ({}), using scaffold",
            reason
        ));
        Ok((scaffold(objective, proposal), true))
    }

    /// Backfill `original_content` for updates. An update whose file cannot
    /// be read becomes a create.
    pub(super) async fn resolve_changes(&self, changes: Vec<FileChange>) -> Vec<FileChange> {
        let reader = Arc::clone(&self.collaborators.file_reader);

        let resolved = changes.into_iter().map(|change| {
            let reader = Arc::clone(&reader);
            async move {
                if change.action != FileAction::Update {
                    return (change, false);
                }
                match reader.read_file(&change.path).await {
                    Some(original) => (change.with_original(original), false),
                    None => (
                        FileChange {
                            action: FileAction::Create,
                            original_content: None,
                            ..change
                        },
                        true,
                    ),
                }
            }
        });

        join_all(resolved)
            .await
            .into_iter()
            .map(|(change, demoted)| {
                if demoted {
                    warn!(
                        "Debate {}: {} does not exist, treating update as create",
                        self.id, change.path
                    );
                    self.log(format!(
                        "{} not found, update converted to create",
                        change.path
                    ));
                }
                change
            })
            .collect()
    }
}
