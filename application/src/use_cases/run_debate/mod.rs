//! Debate orchestrator
//!
//! Drives one objective through the debate protocol:
//! 1. Parallel proposals - every agent proposes from its domain
//! 2. Synthesis - the orchestrator-role agent merges the proposals
//! 3. Awaiting approval - a human approves or asks for a refinement round
//! 4. Generating code - the implementation agent emits file changes,
//!    repaired and quality-gated
//! 5. QC review - lint, typecheck and agent review
//! 6. Generating code (resolve) - update changes get their original content
//! 7. Executing - the change set is published
//!
//! Any failure moves the debate to `FAILED` with a reason. An orchestrator
//! runs a single debate; `start_debate` on a used instance is rejected.

mod codegen;
mod proposals;
mod quality_review;
mod synthesis;
pub mod types;
mod votes;

pub use types::{DebateCollaborators, DebateError, QcReport};

use crate::config::{DebateConfig, QcPolicy};
use crate::ports::agent::Agent;
use crate::use_cases::approval_gate::{ApprovalDecision, ApprovalGate, GateOutcome};
use council_domain::{
    DebateEvent, DebateId, DebatePromptTemplate, DebateResult, DebateState, SynthesisResult,
    UserApprovalRequest,
};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

struct DebateStatus {
    /// Set by the first `start_debate`; later calls are refused.
    started: bool,
    state: DebateState,
    round: usize,
    failure_reason: Option<String>,
}

/// Single-use driver of one debate.
pub struct DebateOrchestrator {
    id: DebateId,
    agents: Vec<Arc<dyn Agent>>,
    collaborators: DebateCollaborators,
    config: DebateConfig,
    events: mpsc::UnboundedSender<DebateEvent>,
    status: Mutex<DebateStatus>,
    gate: ApprovalGate,
    cancellation: CancellationToken,
}

impl DebateOrchestrator {
    pub fn new(agents: Vec<Arc<dyn Agent>>, events: mpsc::UnboundedSender<DebateEvent>) -> Self {
        Self {
            id: DebateId::new(),
            agents,
            collaborators: DebateCollaborators::default(),
            config: DebateConfig::default(),
            events,
            status: Mutex::new(DebateStatus {
                started: false,
                state: DebateState::Idle,
                round: 1,
                failure_reason: None,
            }),
            gate: ApprovalGate::new(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_id(mut self, id: DebateId) -> Self {
        self.id = id;
        self
    }

    pub fn with_config(mut self, config: DebateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_collaborators(mut self, collaborators: DebateCollaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn id(&self) -> DebateId {
        self.id
    }

    pub fn agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }

    pub async fn state(&self) -> DebateState {
        self.status.lock().await.state
    }

    pub async fn round(&self) -> usize {
        self.status.lock().await.round
    }

    pub async fn failure_reason(&self) -> Option<String> {
        self.status.lock().await.failure_reason.clone()
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Run the whole protocol for `objective`.
    ///
    /// Returns `true` once the change set has been published, `false` if the
    /// debate failed or this orchestrator was already used.
    pub async fn start_debate(&self, objective: &str) -> bool {
        {
            let mut status = self.status.lock().await;
            if status.started {
                warn!(
                    "Debate {} already started (state {}), ignoring start request",
                    self.id, status.state
                );
                return false;
            }
            status.started = true;
        }

        info!(
            "Starting debate {} with {} agents",
            self.id,
            self.agents.len()
        );

        match self.run(objective).await {
            Ok(result) => {
                info!(
                    "Debate {} finished with {} file change(s)",
                    self.id,
                    result.file_changes.len()
                );
                self.emit(DebateEvent::FileChanges {
                    debate_id: self.id,
                    result,
                });
                true
            }
            Err(e) => {
                self.fail(&e).await;
                false
            }
        }
    }

    /// Approve the pending synthesis. Only accepted while awaiting approval.
    pub async fn approve(&self) -> bool {
        self.resolve_gate(ApprovalDecision::Approve).await
    }

    /// Ask for another proposal round. Only accepted while awaiting approval.
    pub async fn request_refinement(&self, feedback: &str) -> bool {
        self.resolve_gate(ApprovalDecision::Refine(feedback.to_string()))
            .await
    }

    async fn resolve_gate(&self, decision: ApprovalDecision) -> bool {
        let state = self.state().await;
        if state != DebateState::AwaitingUserApproval || !self.gate.is_armed().await {
            warn!(
                "Debate {} is not awaiting approval (state {}), ignoring {:?}",
                self.id, state, decision
            );
            return false;
        }
        self.gate.resolve(decision).await
    }

    async fn run(&self, objective: &str) -> Result<DebateResult, DebateError> {
        if self.agents.is_empty() {
            return Err(DebateError::NoAgents);
        }
        if objective.trim().is_empty() {
            return Err(DebateError::InvalidObjective(
                "objective is empty".to_string(),
            ));
        }

        let mut current_objective = objective.to_string();

        loop {
            self.transition(DebateState::ParallelProposals, None).await?;
            let proposals = self.collect_proposals(&current_objective).await;
            if proposals.is_empty() {
                return Err(DebateError::NoProposals);
            }
            self.check_cancelled()?;

            self.transition(DebateState::Synthesis, None).await?;
            let synthesis = self.synthesize(&current_objective, &proposals).await;
            self.check_cancelled()?;

            let round = self.round().await;
            let request = UserApprovalRequest::new(
                self.id,
                round,
                &current_objective,
                proposals,
                synthesis.clone(),
            );

            let rx = self.gate.arm().await;
            self.transition(DebateState::AwaitingUserApproval, None)
                .await?;
            self.emit(DebateEvent::UserApprovalRequired(request));

            let outcome = self
                .gate
                .wait(rx, self.config.approval_timeout, &self.cancellation)
                .await;

            match outcome {
                GateOutcome::Decided(ApprovalDecision::Approve) => {
                    self.log(format!("Round {} approved", round));
                    return self.implement(&current_objective, &synthesis).await;
                }
                GateOutcome::Decided(ApprovalDecision::Refine(feedback)) => {
                    let next_round = {
                        let mut status = self.status.lock().await;
                        status.round += 1;
                        status.round
                    };
                    if next_round > self.config.max_rounds {
                        return Err(DebateError::MaxRoundsReached(self.config.max_rounds));
                    }
                    self.log(format!(
                        "Refinement requested, starting round {}",
                        next_round
                    ));
                    current_objective =
                        DebatePromptTemplate::refinement_objective(objective, &feedback);
                }
                GateOutcome::TimedOut => {
                    return Err(DebateError::ApprovalTimeout(
                        self.config.approval_timeout.as_secs(),
                    ));
                }
                GateOutcome::Cancelled => return Err(DebateError::Cancelled),
            }
        }
    }

    /// Phases after approval: generate, review, resolve, publish.
    async fn implement(
        &self,
        objective: &str,
        synthesis: &SynthesisResult,
    ) -> Result<DebateResult, DebateError> {
        let proposal = synthesis.hybrid_proposal.as_str();

        self.transition(DebateState::GeneratingCode, None).await?;
        let (changes, scaffolded) = self.generate_code(objective, proposal).await?;
        self.check_cancelled()?;

        self.transition(DebateState::QcReview, None).await?;
        let report = self.quality_review(objective, proposal, &changes).await;
        if !report.passed() {
            match self.config.qc_policy {
                QcPolicy::WarnOnly => {
                    warn!("Debate {} quality review failed: {}", self.id, report.summary());
                    self.log(format!(
                        "Quality review failed, continuing: {}",
                        report.summary()
                    ));
                }
                QcPolicy::Block => {
                    return Err(DebateError::QualityReviewFailed(report.summary()));
                }
            }
        }
        self.check_cancelled()?;

        self.transition(
            DebateState::GeneratingCode,
            Some("resolving original file contents".to_string()),
        )
        .await?;
        let changes = self.resolve_changes(changes).await;

        self.transition(DebateState::Executing, None).await?;
        Ok(DebateResult::success(proposal, changes, scaffolded))
    }

    async fn transition(
        &self,
        to: DebateState,
        reason: Option<String>,
    ) -> Result<(), DebateError> {
        let round = {
            let mut status = self.status.lock().await;
            status.state = status.state.transition(to)?;
            status.round
        };
        info!("Debate {} round {}: {}", self.id, round, to.display_name());
        self.emit(DebateEvent::StateChange {
            debate_id: self.id,
            state: to,
            round,
            reason,
        });
        Ok(())
    }

    async fn fail(&self, error: &DebateError) {
        let reason = error.to_string();
        let (moved, round) = {
            let mut status = self.status.lock().await;
            let moved = status.state.can_transition_to(DebateState::Failed);
            if moved {
                status.state = DebateState::Failed;
                status.failure_reason = Some(reason.clone());
            }
            (moved, status.round)
        };

        warn!("Debate {} failed in round {}: {}", self.id, round, reason);
        self.log(format!("Debate failed: {}", reason));

        if moved {
            self.emit(DebateEvent::StateChange {
                debate_id: self.id,
                state: DebateState::Failed,
                round,
                reason: Some(reason),
            });
        }
        if error.emits_empty_result() {
            self.emit(DebateEvent::FileChanges {
                debate_id: self.id,
                result: DebateResult::empty(),
            });
        }
    }

    fn check_cancelled(&self) -> Result<(), DebateError> {
        if self.cancellation.is_cancelled() {
            Err(DebateError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn emit(&self, event: DebateEvent) {
        // Nobody listening is not an error.
        let _ = self.events.send(event);
    }

    fn log(&self, message: impl Into<String>) {
        self.emit(DebateEvent::Log {
            debate_id: self.id,
            message: message.into(),
        });
    }
}
