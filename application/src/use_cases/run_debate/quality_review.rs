//! QC review: automated checks plus agent review.

use super::DebateOrchestrator;
use super::types::QcReport;
use crate::ports::agent::Agent;
use crate::ports::code_check::{CheckReport, CodeCheckPort};
use council_domain::{DebatePromptTemplate, FileChange, parse_review_pass};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

impl DebateOrchestrator {
    pub(super) async fn quality_review(
        &self,
        objective: &str,
        proposal: &str,
        changes: &[FileChange],
    ) -> QcReport {
        let (lint, typecheck) = tokio::join!(
            run_check(self.collaborators.lint.as_ref(), changes),
            run_check(self.collaborators.typecheck.as_ref(), changes),
        );

        let approvals = self.agent_review(objective, proposal).await;

        let report = QcReport {
            lint,
            typecheck,
            approvals,
            reviewers: self.agents.len(),
            required_ratio: self.config.review_pass_ratio,
        };
        info!("Debate {} QC review: {}", self.id, report.summary());
        self.log(format!("QC review: {}", report.summary()));
        report
    }

    /// Number of agents whose review passes. Failed reviews count as no.
    async fn agent_review(&self, objective: &str, proposal: &str) -> usize {
        let mut join_set = JoinSet::new();
        let pass_score = self.config.review_pass_score;

        for agent in &self.agents {
            let agent = Arc::clone(agent);
            let prompt =
                DebatePromptTemplate::review_prompt(agent.role().domain(), objective, proposal);
            join_set.spawn(async move {
                let result = agent.process_message(&prompt).await;
                (agent, result)
            });
        }

        let mut approvals = 0;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((agent, Ok(reply))) => {
                    if parse_review_pass(&reply, pass_score) {
                        approvals += 1;
                    } else {
                        info!("Agent {} did not pass the proposal", agent.id());
                    }
                }
                Ok((agent, Err(e))) => {
                    warn!("Agent {} review failed: {}", agent.id(), e);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }
        approvals
    }
}

async fn run_check(check: &dyn CodeCheckPort, changes: &[FileChange]) -> CheckReport {
    match check.check(changes).await {
        Ok(report) => report,
        Err(e) => {
            warn!("{} check errored: {}", check.name(), e);
            CheckReport::failed(vec![e.to_string()])
        }
    }
}
