//! CLI entrypoint for Agent Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    Agent, CodeCheckPort, DebateCollaborators, EventLogger, NoEventLogger, SkipCheck,
    TaskDispatchEngine,
};
use council_domain::{ConfigIssue, DebateEvent, DebateResult, Severity, Task};
use council_infrastructure::{
    ConfigLoader, FileChecksConfig, FileConfig, JsonlEventLogger, LocalFileReader, ProcessAgent,
    ShellCodeCheck,
};
use council_presentation::{
    ActivityView, ApprovalCommand, ApprovalPrompt, Cli, Command, ConsoleRenderer, NoProgress,
    ProgressReporter,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting Agent Council");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    report_issues(&config.validate())?;

    let Some(Command::Run {
        objective,
        auto_approve,
    }) = cli.command
    else {
        bail!("No command given. Try: agent-council run \"<objective>\"");
    };

    // === Dependency Injection ===
    let agents = build_agents(&config);
    if agents.is_empty() {
        bail!("No agents configured. Add [[agents]] entries to council.toml");
    }

    let engine = Arc::new(
        TaskDispatchEngine::new(config.to_engine_config())
            .with_collaborators(build_collaborators(&config.checks))
            .with_event_logger(build_event_logger(&config)),
    );
    for agent in agents {
        engine.register_agent(agent).await;
    }

    let mut events = engine.subscribe().await;
    let mut activity: Box<dyn ActivityView> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                 Agent Council - Debate                     |");
        println!("+============================================================+");
        println!();
        println!("Objective: {}", objective);
        println!();
    }

    let task = Task::debate_init(objective);
    let mut runner = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.submit_task(task).await })
    };

    let mut session = Session {
        engine: Arc::clone(&engine),
        auto_approve,
        quiet: cli.quiet,
        result: None,
    };

    loop {
        tokio::select! {
            joined = &mut runner => {
                joined.context("Debate task panicked")?;
                break;
            }
            Some(event) = events.recv() => {
                session.handle(event, activity.as_mut()).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, cancelling debate");
                engine.cancel_debate().await;
            }
        }
    }

    // The engine relays every event before the task completes.
    while let Ok(event) = events.try_recv() {
        session.handle(event, activity.as_mut()).await?;
    }
    activity.clear();

    let outcome = engine
        .results()
        .await
        .into_iter()
        .next()
        .context("Debate produced no result")?;

    if let Some(result) = &session.result {
        println!("{}", ConsoleRenderer::format_result(result, cli.output));
    }

    if !outcome.success {
        bail!(
            "Debate failed: {}",
            outcome.error.as_deref().unwrap_or("unknown reason")
        );
    }

    Ok(())
}

/// Per-run event handling state.
struct Session {
    engine: Arc<TaskDispatchEngine>,
    auto_approve: bool,
    quiet: bool,
    result: Option<DebateResult>,
}

impl Session {
    async fn handle(&mut self, event: DebateEvent, activity: &mut dyn ActivityView) -> Result<()> {
        activity.observe(&event);
        if !self.quiet
            && let Some(line) = ConsoleRenderer::render_event(&event)
        {
            println!("{}", line);
        }

        match event {
            DebateEvent::UserApprovalRequired(request) => {
                if self.auto_approve {
                    info!("Auto-approving round {}", request.round);
                    self.engine.approve_proposal().await;
                    return Ok(());
                }

                activity.clear();
                let command =
                    tokio::task::spawn_blocking(move || ApprovalPrompt::stdio().ask(&request))
                        .await
                        .context("Approval prompt panicked")?
                        .context("Approval prompt failed")?;

                let accepted = match command {
                    ApprovalCommand::Approve => self.engine.approve_proposal().await,
                    ApprovalCommand::Refine(feedback) => {
                        self.engine.request_refinement(&feedback).await
                    }
                    ApprovalCommand::Abort => self.engine.cancel_debate().await,
                };
                if !accepted {
                    eprintln!("Decision was not applied: the debate is no longer waiting for one.");
                }
            }
            DebateEvent::FileChanges { result, .. } => {
                self.result = Some(result);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Install the tracing subscriber. Returns the file writer guard, which must
/// stay alive for buffered lines to be written.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agent-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

/// Print configuration issues; fail on errors.
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Error => eprintln!("Config error: {}", issue.message),
            Severity::Warning => eprintln!("Config warning: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(issues) {
        bail!("Configuration is invalid");
    }
    Ok(())
}

fn build_agents(config: &FileConfig) -> Vec<Arc<dyn Agent>> {
    config
        .agents
        .iter()
        .map(|entry| {
            Arc::new(
                ProcessAgent::new(entry.to_profile(), entry.command.clone())
                    .with_args(entry.args.clone()),
            ) as Arc<dyn Agent>
        })
        .collect()
}

fn build_collaborators(checks: &FileChecksConfig) -> DebateCollaborators {
    let working_dir = checks.resolved_working_dir();
    let timeout = Duration::from_secs(checks.timeout_secs);
    let check = |name: &str, command: &Option<String>| -> Arc<dyn CodeCheckPort> {
        match command {
            Some(command) => Arc::new(
                ShellCodeCheck::new(name, command.clone())
                    .with_working_dir(working_dir.clone())
                    .with_timeout(timeout),
            ),
            None => Arc::new(SkipCheck::new(name)),
        }
    };

    DebateCollaborators::default()
        .with_file_reader(Arc::new(LocalFileReader::new(working_dir.clone())))
        .with_lint(check("lint", &checks.lint))
        .with_typecheck(check("typecheck", &checks.typecheck))
}

fn build_event_logger(config: &FileConfig) -> Arc<dyn EventLogger> {
    match config
        .logging
        .resolved_event_log()
        .and_then(JsonlEventLogger::new)
    {
        Some(logger) => {
            info!("Writing debate events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoEventLogger),
    }
}
