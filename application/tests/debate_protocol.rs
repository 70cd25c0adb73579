//! End-to-end behavior of the debate protocol against scripted agents.

use async_trait::async_trait;
use council_application::{
    Agent, AgentError, CheckError, CheckReport, CodeCheckPort, DebateCollaborators, DebateConfig,
    DebateOrchestrator, FileReaderPort, QcPolicy,
};
use council_domain::{
    AgentProfile, AgentRole, DebateEvent, DebateResult, DebateState, FileAction, FileChange,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, mpsc};

// ==================== Test Mocks ====================

const GOOD_CODE: &str = "export function login(user: string) {\n  return user.length > 0;\n}\n";

fn good_changes() -> Vec<FileChange> {
    vec![FileChange::create("src/login.ts", GOOD_CODE)]
}

struct MockAgent {
    profile: AgentProfile,
    proposal: Result<String, AgentError>,
    implementation: String,
    review: String,
    vote: String,
    prompts: Mutex<Vec<String>>,
}

impl MockAgent {
    fn new(id: &str, role: AgentRole) -> Self {
        Self {
            profile: AgentProfile::new(id, id.to_uppercase(), role),
            proposal: Ok(format!("Proposal from {}", id)),
            implementation: serde_json::to_string(&good_changes()).unwrap(),
            review: "APPROVED".to_string(),
            vote: "APPROVE".to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(mut self) -> Self {
        self.proposal = Err(AgentError::RequestFailed("model offline".to_string()));
        self
    }

    fn implementing(mut self, output: &str) -> Self {
        self.implementation = output.to_string();
        self
    }

    fn reviewing(mut self, review: &str) -> Self {
        self.review = review.to_string();
        self
    }

    fn voting(mut self, vote: &str) -> Self {
        self.vote = vote.to_string();
        self
    }

    fn prompts_starting_with(&self, prefix: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn process_message(&self, prompt: &str) -> Result<String, AgentError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if prompt.starts_with("You are the ") {
            self.proposal.clone()
        } else if prompt.starts_with("You are moderating") {
            Ok("Hybrid plan: login form with server-side validation".to_string())
        } else if prompt.starts_with("Implement the approved") {
            Ok(self.implementation.clone())
        } else if prompt.starts_with("Review this approved") {
            Ok(self.review.clone())
        } else if prompt.starts_with("Vote on") {
            Ok(self.vote.clone())
        } else {
            Err(AgentError::InvalidResponse("unexpected prompt".to_string()))
        }
    }
}

/// Implementer that holds code generation open until released.
struct HeldCoder {
    inner: MockAgent,
    generating: Notify,
    release: Notify,
}

impl HeldCoder {
    fn new() -> Self {
        Self {
            inner: MockAgent::new("coder", AgentRole::Implementation),
            generating: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl Agent for HeldCoder {
    fn profile(&self) -> &AgentProfile {
        self.inner.profile()
    }

    async fn process_message(&self, prompt: &str) -> Result<String, AgentError> {
        if prompt.starts_with("Implement the approved") {
            self.generating.notify_one();
            self.release.notified().await;
        }
        self.inner.process_message(prompt).await
    }
}

struct FixedCheck {
    report: CheckReport,
}

#[async_trait]
impl CodeCheckPort for FixedCheck {
    fn name(&self) -> &str {
        "lint"
    }

    async fn check(&self, _changes: &[FileChange]) -> Result<CheckReport, CheckError> {
        Ok(self.report.clone())
    }
}

struct MapFileReader {
    files: HashMap<String, String>,
}

#[async_trait]
impl FileReaderPort for MapFileReader {
    async fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }
}

// ==================== Harness ====================

enum Decision {
    Approve,
    Refine(&'static str),
    Ignore,
}

fn orchestrator(
    agents: Vec<Arc<MockAgent>>,
    config: DebateConfig,
) -> (DebateOrchestrator, mpsc::UnboundedReceiver<DebateEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let agents: Vec<Arc<dyn Agent>> = agents.into_iter().map(|a| a as Arc<dyn Agent>).collect();
    (
        DebateOrchestrator::new(agents, tx).with_config(config),
        rx,
    )
}

fn fast_config() -> DebateConfig {
    DebateConfig::default().with_approval_timeout(Duration::from_secs(5))
}

/// Run a debate, answering approval requests from `script` in order.
async fn drive(
    debate: &DebateOrchestrator,
    rx: &mut mpsc::UnboundedReceiver<DebateEvent>,
    objective: &str,
    script: Vec<Decision>,
) -> (bool, Vec<DebateEvent>) {
    let mut script = VecDeque::from(script);
    let mut events = Vec::new();

    let driver = async {
        while let Some(event) = rx.recv().await {
            let terminal = matches!(
                &event,
                DebateEvent::StateChange { state, .. } if state.is_terminal()
            );
            if matches!(event, DebateEvent::UserApprovalRequired(_)) {
                match script.pop_front() {
                    Some(Decision::Approve) => assert!(debate.approve().await),
                    Some(Decision::Refine(feedback)) => {
                        assert!(debate.request_refinement(feedback).await)
                    }
                    Some(Decision::Ignore) | None => {}
                }
            }
            events.push(event);
            if terminal {
                break;
            }
        }
    };

    let (success, ()) = tokio::join!(debate.start_debate(objective), driver);
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    (success, events)
}

fn states(events: &[DebateEvent]) -> Vec<DebateState> {
    events
        .iter()
        .filter_map(|e| match e {
            DebateEvent::StateChange { state, .. } => Some(*state),
            _ => None,
        })
        .collect()
}

fn results(events: &[DebateEvent]) -> Vec<DebateResult> {
    events
        .iter()
        .filter_map(|e| match e {
            DebateEvent::FileChanges { result, .. } => Some(result.clone()),
            _ => None,
        })
        .collect()
}

fn roster() -> (Arc<MockAgent>, Arc<MockAgent>, Arc<MockAgent>) {
    (
        Arc::new(MockAgent::new("moderator", AgentRole::Orchestrator)),
        Arc::new(MockAgent::new("architect", AgentRole::Architect)),
        Arc::new(MockAgent::new("coder", AgentRole::Implementation)),
    )
}

// ==================== Protocol ====================

#[tokio::test]
async fn test_approved_debate_publishes_changes() {
    let (moderator, architect, coder) = roster();
    let (debate, mut rx) = orchestrator(
        vec![moderator.clone(), architect.clone(), coder.clone()],
        fast_config(),
    );

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    assert!(success);
    assert_eq!(debate.state().await, DebateState::Executing);
    assert_eq!(
        states(&events),
        vec![
            DebateState::ParallelProposals,
            DebateState::Synthesis,
            DebateState::AwaitingUserApproval,
            DebateState::GeneratingCode,
            DebateState::QcReview,
            DebateState::GeneratingCode,
            DebateState::Executing,
        ]
    );

    let published = results(&events);
    assert_eq!(published.len(), 1);
    assert!(published[0].success);
    assert!(!published[0].scaffolded);
    assert!(published[0].votes.is_empty());
    assert_eq!(published[0].file_changes, good_changes());

    // Synthesis goes to the orchestrator-role agent, code to the implementer
    assert_eq!(moderator.prompts_starting_with("You are moderating"), 1);
    assert_eq!(architect.prompts_starting_with("You are moderating"), 0);
    assert_eq!(coder.prompts_starting_with("Implement the approved"), 1);
}

#[tokio::test]
async fn test_approval_request_carries_proposals_and_synthesis() {
    let (moderator, architect, coder) = roster();
    let failing = Arc::new(MockAgent::new("ux", AgentRole::Ux).failing());
    let (debate, mut rx) = orchestrator(vec![moderator, architect, coder, failing], fast_config());

    let (_, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    let request = events
        .iter()
        .find_map(|e| match e {
            DebateEvent::UserApprovalRequired(request) => Some(request.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(request.debate_id, debate.id());
    assert_eq!(request.round, 1);
    assert_eq!(request.proposals.len(), 3);
    assert_eq!(request.synthesis.confidence, 0.75);
    assert!(
        request
            .synthesis
            .hybrid_proposal
            .starts_with("Hybrid plan")
    );
}

#[tokio::test]
async fn test_all_proposals_failing_skips_synthesis() {
    let a = Arc::new(MockAgent::new("moderator", AgentRole::Orchestrator).failing());
    let b = Arc::new(MockAgent::new("coder", AgentRole::Implementation).failing());
    let (debate, mut rx) = orchestrator(vec![a.clone(), b.clone()], fast_config());

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![]).await;

    assert!(!success);
    assert_eq!(debate.state().await, DebateState::Failed);
    assert_eq!(
        debate.failure_reason().await.as_deref(),
        Some("no proposals were collected")
    );
    assert_eq!(a.prompts_starting_with("You are moderating"), 0);
    assert_eq!(b.prompts_starting_with("You are moderating"), 0);
    assert_eq!(
        states(&events),
        vec![DebateState::ParallelProposals, DebateState::Failed]
    );
}

#[tokio::test]
async fn test_approval_timeout_fails_once() {
    let (moderator, architect, coder) = roster();
    let config = DebateConfig::default().with_approval_timeout(Duration::from_millis(50));
    let (debate, mut rx) = orchestrator(vec![moderator, architect, coder], config);

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Ignore]).await;

    assert!(!success);
    assert_eq!(debate.state().await, DebateState::Failed);
    assert!(
        debate
            .failure_reason()
            .await
            .unwrap()
            .starts_with("approval timed out")
    );

    let failed = states(&events)
        .into_iter()
        .filter(|s| *s == DebateState::Failed)
        .count();
    assert_eq!(failed, 1);

    let published = results(&events);
    assert_eq!(published.len(), 1);
    assert!(!published[0].success);
    assert!(published[0].file_changes.is_empty());

    // The gate is disarmed; late decisions are rejected
    assert!(!debate.approve().await);
}

#[tokio::test]
async fn test_refinement_exhausts_rounds() {
    let (moderator, architect, coder) = roster();
    let (debate, mut rx) = orchestrator(
        vec![moderator, architect.clone(), coder],
        fast_config().with_max_rounds(3),
    );

    let (success, events) = drive(
        &debate,
        &mut rx,
        "Add a login page",
        vec![
            Decision::Refine("use passkeys"),
            Decision::Refine("support SSO"),
            Decision::Refine("one more time"),
        ],
    )
    .await;

    assert!(!success);
    assert_eq!(debate.state().await, DebateState::Failed);
    assert_eq!(
        debate.failure_reason().await.as_deref(),
        Some("maximum rounds (3) reached")
    );
    assert_eq!(architect.prompts_starting_with("You are the "), 3);

    let approvals = events
        .iter()
        .filter(|e| matches!(e, DebateEvent::UserApprovalRequired(_)))
        .count();
    assert_eq!(approvals, 3);
}

#[tokio::test]
async fn test_refinement_feeds_back_into_next_round() {
    let (moderator, architect, coder) = roster();
    let (debate, mut rx) = orchestrator(vec![moderator, architect.clone(), coder], fast_config());

    let (success, events) = drive(
        &debate,
        &mut rx,
        "Add a login page",
        vec![Decision::Refine("use passkeys"), Decision::Approve],
    )
    .await;

    assert!(success);
    assert_eq!(debate.round().await, 2);
    let prompts = architect.prompts.lock().unwrap().clone();
    assert!(prompts.iter().any(|p| p.contains("use passkeys")));

    let rounds: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            DebateEvent::UserApprovalRequired(request) => Some(request.round),
            _ => None,
        })
        .collect();
    assert_eq!(rounds, vec![1, 2]);
}

#[tokio::test]
async fn test_stub_code_is_replaced_by_scaffold() {
    let moderator = Arc::new(MockAgent::new("moderator", AgentRole::Orchestrator));
    let stub = serde_json::to_string(&vec![FileChange::create(
        "src/login.ts",
        "export function login() {\n  // TODO\n  return null;\n}\n",
    )])
    .unwrap();
    let coder = Arc::new(MockAgent::new("coder", AgentRole::Implementation).implementing(&stub));
    let (debate, mut rx) = orchestrator(vec![moderator, coder], fast_config());

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    assert!(success);
    let published = results(&events);
    assert!(published[0].scaffolded);
    assert_eq!(published[0].file_changes.len(), 1);
    assert_eq!(published[0].file_changes[0].path, "generated/add-a-login-page.md");
}

#[tokio::test]
async fn test_unparseable_output_uses_fallback_file() {
    let coder = Arc::new(
        MockAgent::new("coder", AgentRole::Implementation)
            .implementing("I am unable to produce JSON today, sorry about that.\nHere is prose instead.\nAnd a third line."),
    );
    let (debate, mut rx) = orchestrator(vec![coder], fast_config());

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    assert!(success);
    let published = results(&events);
    assert!(!published[0].file_changes.is_empty());
}

#[tokio::test]
async fn test_block_policy_fails_on_lint_errors() {
    let (moderator, architect, coder) = roster();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let agents: Vec<Arc<dyn Agent>> = vec![moderator, architect, coder];
    let debate = DebateOrchestrator::new(agents, tx)
        .with_config(fast_config().with_qc_policy(QcPolicy::Block))
        .with_collaborators(DebateCollaborators::default().with_lint(Arc::new(FixedCheck {
            report: CheckReport::failed(vec!["src/login.ts:1 unused variable".to_string()]),
        })));

    let (success, _) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    assert!(!success);
    assert!(
        debate
            .failure_reason()
            .await
            .unwrap()
            .starts_with("quality review failed")
    );
}

#[tokio::test]
async fn test_warn_only_policy_proceeds_on_poor_reviews() {
    let moderator = Arc::new(MockAgent::new("moderator", AgentRole::Orchestrator).reviewing("Score: 3"));
    let architect = Arc::new(MockAgent::new("architect", AgentRole::Architect).reviewing("Score: 4"));
    let coder = Arc::new(MockAgent::new("coder", AgentRole::Implementation));
    let (debate, mut rx) = orchestrator(vec![moderator, architect, coder], fast_config());

    let (success, events) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;

    assert!(success);
    assert!(events.iter().any(|e| matches!(
        e,
        DebateEvent::Log { message, .. } if message.starts_with("Quality review failed")
    )));
}

#[tokio::test]
async fn test_updates_are_resolved_against_existing_files() {
    let output = serde_json::to_string(&vec![
        FileChange::update("src/app.ts", GOOD_CODE),
        FileChange::update("src/missing.ts", GOOD_CODE),
    ])
    .unwrap();
    let coder = Arc::new(MockAgent::new("coder", AgentRole::Implementation).implementing(&output));
    let reader = MapFileReader {
        files: HashMap::from([("src/app.ts".to_string(), "old app".to_string())]),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let agents: Vec<Arc<dyn Agent>> = vec![coder];
    let debate = DebateOrchestrator::new(agents, tx)
        .with_config(fast_config())
        .with_collaborators(DebateCollaborators::default().with_file_reader(Arc::new(reader)));

    let (success, events) = drive(&debate, &mut rx, "Refactor app", vec![Decision::Approve]).await;

    assert!(success);
    let changes = &results(&events)[0].file_changes;
    assert_eq!(changes[0].action, FileAction::Update);
    assert_eq!(changes[0].original_content.as_deref(), Some("old app"));
    assert_eq!(changes[1].action, FileAction::Create);
    assert_eq!(changes[1].original_content, None);
}

#[tokio::test]
async fn test_orchestrator_is_single_use() {
    let (moderator, architect, coder) = roster();
    let (debate, mut rx) = orchestrator(vec![moderator, architect, coder], fast_config());

    let (success, _) = drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]).await;
    assert!(success);

    assert!(!debate.start_debate("Another objective").await);
    assert_eq!(debate.state().await, DebateState::Executing);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_start_runs_one_debate() {
    let (moderator, architect, coder) = roster();
    let (debate, mut rx) = orchestrator(vec![moderator, architect, coder], fast_config());

    let ((first, events), second) = tokio::join!(
        drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]),
        debate.start_debate("Add a login page"),
    );

    assert!(first != second, "exactly one start should run the debate");
    assert_eq!(debate.state().await, DebateState::Executing);
    assert_eq!(debate.failure_reason().await, None);
    assert!(!states(&events).contains(&DebateState::Failed));
}

#[tokio::test]
async fn test_decisions_rejected_during_code_generation() {
    let moderator = Arc::new(MockAgent::new("moderator", AgentRole::Orchestrator));
    let coder = Arc::new(HeldCoder::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let agents: Vec<Arc<dyn Agent>> = vec![moderator, coder.clone()];
    let debate = DebateOrchestrator::new(agents, tx).with_config(fast_config());

    let late_decisions = async {
        coder.generating.notified().await;
        let state = debate.state().await;
        let refined = debate.request_refinement("too late").await;
        let approved = debate.approve().await;
        coder.release.notify_one();
        (state, refined, approved)
    };

    let ((success, events), (state, refined, approved)) = tokio::join!(
        drive(&debate, &mut rx, "Add a login page", vec![Decision::Approve]),
        late_decisions,
    );

    assert_eq!(state, DebateState::GeneratingCode);
    assert!(!refined);
    assert!(!approved);
    assert!(success);
    assert_eq!(debate.state().await, DebateState::Executing);
    assert_eq!(debate.round().await, 1);
    assert_eq!(results(&events)[0].file_changes, good_changes());
}

#[tokio::test]
async fn test_empty_roster_fails() {
    let (debate, mut rx) = orchestrator(Vec::new(), fast_config());
    let (success, _) = drive(&debate, &mut rx, "Add a login page", vec![]).await;

    assert!(!success);
    assert_eq!(
        debate.failure_reason().await.as_deref(),
        Some("no agents registered")
    );
}

#[tokio::test]
async fn test_decisions_rejected_outside_approval() {
    let (moderator, architect, coder) = roster();
    let (debate, _rx) = orchestrator(vec![moderator, architect, coder], fast_config());

    assert!(!debate.approve().await);
    assert!(!debate.request_refinement("anything").await);
    assert_eq!(debate.state().await, DebateState::Idle);
}

// ==================== Votes ====================

#[tokio::test]
async fn test_majority_vote_consensus() {
    let agents: Vec<Arc<MockAgent>> = vec![
        Arc::new(MockAgent::new("a", AgentRole::Architect)),
        Arc::new(MockAgent::new("b", AgentRole::Security)),
        Arc::new(MockAgent::new("c", AgentRole::Ux)),
        Arc::new(MockAgent::new("d", AgentRole::Ai).voting("REJECT: too risky")),
        Arc::new(MockAgent::new("e", AgentRole::Implementation).voting("REJECT")),
    ];
    let (debate, _rx) = orchestrator(agents, fast_config());

    let round = debate.collect_votes("proposal-1", "Ship it").await;
    assert!(round.is_approved());
    assert_eq!(round.result.approve_count, 3);
    assert_eq!(round.result.reject_count, 2);
}

#[tokio::test]
async fn test_tied_vote_is_not_consensus() {
    let agents: Vec<Arc<MockAgent>> = vec![
        Arc::new(MockAgent::new("a", AgentRole::Architect)),
        Arc::new(MockAgent::new("b", AgentRole::Security)),
        Arc::new(MockAgent::new("c", AgentRole::Ux).voting("REJECT")),
        Arc::new(MockAgent::new("d", AgentRole::Ai).voting("REJECT")),
    ];
    let (debate, _rx) = orchestrator(agents, fast_config());

    let round = debate.collect_votes("proposal-1", "Ship it").await;
    assert!(!round.is_approved());
}
