//! Task dispatch engine
//!
//! FIFO queue of [`Task`]s drained in batches of up to `max_concurrency`.
//! `debate_init` tasks spin up a [`DebateOrchestrator`] whose events are
//! relayed to every engine subscriber; a batch holds at most one of them, so
//! approval controls always reach the only running debate. Generic tasks go
//! to the first agent that can handle them. Dispatch failures are recorded as failed
//! [`ExecutionResult`]s and never returned to the submitter.

use crate::config::EngineConfig;
use crate::ports::agent::Agent;
use crate::ports::event_logger::{EventLogger, NoEventLogger};
use crate::use_cases::run_debate::{DebateCollaborators, DebateOrchestrator};
use council_domain::{AgentId, DebateEvent, ExecutionResult, Task, TaskKind};
use futures::future::join_all;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, info, warn};

type Subscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<DebateEvent>>>>;

pub struct TaskDispatchEngine {
    agents: RwLock<Vec<Arc<dyn Agent>>>,
    queue: Mutex<VecDeque<Task>>,
    results: Mutex<Vec<ExecutionResult>>,
    processing: AtomicBool,
    config: EngineConfig,
    collaborators: DebateCollaborators,
    active_debate: Mutex<Option<Arc<DebateOrchestrator>>>,
    subscribers: Subscribers,
    event_logger: Arc<dyn EventLogger>,
}

impl Default for TaskDispatchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TaskDispatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            agents: RwLock::new(Vec::new()),
            queue: Mutex::new(VecDeque::new()),
            results: Mutex::new(Vec::new()),
            processing: AtomicBool::new(false),
            config,
            collaborators: DebateCollaborators::default(),
            active_debate: Mutex::new(None),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_collaborators(mut self, collaborators: DebateCollaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Register an agent. An agent with the same id is replaced.
    pub async fn register_agent(&self, agent: Arc<dyn Agent>) {
        let mut agents = self.agents.write().await;
        agents.retain(|a| a.id() != agent.id());
        info!("Registered agent {} ({})", agent.id(), agent.role());
        agents.push(agent);
    }

    pub async fn unregister_agent(&self, id: &AgentId) -> bool {
        let mut agents = self.agents.write().await;
        let before = agents.len();
        agents.retain(|a| a.id() != id);
        before != agents.len()
    }

    pub async fn agent_ids(&self) -> Vec<AgentId> {
        self.agents
            .read()
            .await
            .iter()
            .map(|a| a.id().clone())
            .collect()
    }

    /// Receive every event of every debate this engine runs from now on.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<DebateEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().await.push(tx);
        rx
    }

    pub async fn results(&self) -> Vec<ExecutionResult> {
        self.results.lock().await.clone()
    }

    pub async fn queue_size(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Enqueue a task and drain the queue.
    ///
    /// If a drain is already running the task is only enqueued and this
    /// returns immediately; the running drain picks it up.
    pub async fn submit_task(&self, task: Task) {
        debug!("Task {} submitted ({:?})", task.id, task.kind);
        self.queue.lock().await.push_back(task);

        loop {
            if self.processing.swap(true, Ordering::AcqRel) {
                return;
            }
            self.drain().await;
            self.processing.store(false, Ordering::Release);

            // A submit may have enqueued after the last pop but before the
            // flag was cleared.
            if self.queue.lock().await.is_empty() {
                return;
            }
        }
    }

    /// Approve the active debate's pending proposal.
    pub async fn approve_proposal(&self) -> bool {
        match self.active_debate().await {
            Some(debate) => debate.approve().await,
            None => {
                warn!("No active debate to approve");
                false
            }
        }
    }

    /// Request another round in the active debate.
    pub async fn request_refinement(&self, feedback: &str) -> bool {
        match self.active_debate().await {
            Some(debate) => debate.request_refinement(feedback).await,
            None => {
                warn!("No active debate to refine");
                false
            }
        }
    }

    /// Cancel the active debate, if any.
    pub async fn cancel_debate(&self) -> bool {
        match self.active_debate().await {
            Some(debate) => {
                debate.cancel();
                true
            }
            None => false,
        }
    }

    async fn active_debate(&self) -> Option<Arc<DebateOrchestrator>> {
        self.active_debate.lock().await.clone()
    }

    async fn drain(&self) {
        loop {
            let batch: Vec<Task> = {
                let mut queue = self.queue.lock().await;
                let take = batch_len(&queue, self.config.max_concurrency.max(1));
                queue.drain(..take).collect()
            };
            if batch.is_empty() {
                break;
            }

            debug!("Dispatching batch of {} task(s)", batch.len());
            let outcomes = join_all(batch.into_iter().map(|task| self.run_task(task))).await;
            self.results.lock().await.extend(outcomes);
        }
    }

    async fn run_task(&self, task: Task) -> ExecutionResult {
        match task.kind {
            TaskKind::DebateInit => self.run_debate(task).await,
            TaskKind::Generic => self.run_generic(task).await,
        }
    }

    async fn run_debate(&self, task: Task) -> ExecutionResult {
        let started = Instant::now();
        let agents = self.agents.read().await.clone();

        let (tx, rx) = mpsc::unbounded_channel();
        let debate = Arc::new(
            DebateOrchestrator::new(agents, tx)
                .with_config(self.config.debate.clone())
                .with_collaborators(self.collaborators.clone()),
        );
        let debate_id = debate.id();
        let forwarder = tokio::spawn(forward_events(
            rx,
            Arc::clone(&self.subscribers),
            Arc::clone(&self.event_logger),
        ));

        *self.active_debate.lock().await = Some(Arc::clone(&debate));

        let success = debate.start_debate(&task.description).await;
        let failure_reason = debate.failure_reason().await;

        {
            let mut active = self.active_debate.lock().await;
            if active.as_ref().is_some_and(|d| d.id() == debate_id) {
                *active = None;
            }
        }

        // Dropping the last handle closes the event channel, which ends the
        // forwarder once everything has been relayed.
        drop(debate);
        if let Err(e) = forwarder.await {
            warn!("Event forwarder for debate {} panicked: {}", debate_id, e);
        }

        let elapsed = started.elapsed().as_millis() as u64;
        if success {
            ExecutionResult::succeeded(
                task.id,
                None,
                format!("debate {} completed", debate_id),
                elapsed,
            )
        } else {
            ExecutionResult::failed(
                task.id,
                None,
                failure_reason.unwrap_or_else(|| format!("debate {} did not start", debate_id)),
                elapsed,
            )
        }
    }

    async fn run_generic(&self, task: Task) -> ExecutionResult {
        let started = Instant::now();
        let agent = self
            .agents
            .read()
            .await
            .iter()
            .find(|a| a.can_handle(&task))
            .cloned();

        let Some(agent) = agent else {
            warn!("No agent can handle task {}", task.id);
            return ExecutionResult::failed(task.id, None, "no agent can handle this task", 0);
        };

        let result = agent.execute_task(&task).await;
        let elapsed = started.elapsed().as_millis() as u64;
        match result {
            Ok(output) => {
                info!("Agent {} completed task {}", agent.id(), task.id);
                ExecutionResult::succeeded(task.id, Some(agent.id().clone()), output.content, elapsed)
            }
            Err(e) => {
                warn!("Agent {} failed task {}: {}", agent.id(), task.id, e);
                ExecutionResult::failed(task.id, Some(agent.id().clone()), e.to_string(), elapsed)
            }
        }
    }
}

/// Length of the next batch: up to `limit` tasks from the front, cut before
/// a second `debate_init` so debates run one at a time.
fn batch_len(queue: &VecDeque<Task>, limit: usize) -> usize {
    let mut debate_seen = false;
    for (index, task) in queue.iter().take(limit).enumerate() {
        if task.kind == TaskKind::DebateInit {
            if debate_seen {
                warn!(
                    "Debate task {} waits for the running debate to finish",
                    task.id
                );
                return index;
            }
            debate_seen = true;
        }
    }
    queue.len().min(limit)
}

/// Relay one debate's events verbatim, pruning closed subscribers.
async fn forward_events(
    mut rx: mpsc::UnboundedReceiver<DebateEvent>,
    subscribers: Subscribers,
    logger: Arc<dyn EventLogger>,
) {
    while let Some(event) = rx.recv().await {
        logger.log(&event);
        let mut subscribers = subscribers.lock().await;
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
