//! Console rendering for debate events and results

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use council_domain::core::string::truncate;
use council_domain::{DebateEvent, DebateResult, DebateState, FileAction, UserApprovalRequest};

/// Formats debate events and the final result for terminal display
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// One line per event, or `None` for events shown elsewhere.
    ///
    /// Agent activity is drawn by the progress display and approval
    /// requests by the approval prompt.
    pub fn render_event(event: &DebateEvent) -> Option<String> {
        match event {
            DebateEvent::Log { message, .. } => Some(format!("  {} {}", "·".dimmed(), message)),
            DebateEvent::StateChange {
                state,
                round,
                reason,
                ..
            } => Some(Self::state_line(*state, *round, reason.as_deref())),
            DebateEvent::AgentSpeaking { .. } | DebateEvent::UserApprovalRequired(_) => None,
            DebateEvent::FileChanges { result, .. } => {
                let count = result.file_changes.len();
                Some(format!(
                    "{} {} file change(s) ready",
                    "->".cyan(),
                    count.to_string().bold()
                ))
            }
        }
    }

    fn state_line(state: DebateState, round: usize, reason: Option<&str>) -> String {
        let label = format!("[round {}] {}", round, state.display_name());
        match state {
            DebateState::Failed => format!(
                "{} {}: {}",
                "x".red(),
                label.red().bold(),
                reason.unwrap_or("unknown reason")
            ),
            DebateState::Executing => format!("{} {}", "v".green(), label.green().bold()),
            _ => format!("{} {}", "->".cyan(), label.bold()),
        }
    }

    /// Full approval request: every proposal, then the merged one.
    pub fn format_approval_request(request: &UserApprovalRequest) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!(
            "Proposal Awaiting Approval (round {})",
            request.round
        )));
        output.push('\n');
        output.push_str(&format!("{}\n", request.debate_summary.dimmed()));

        output.push_str(&Self::section_header("Agent Proposals"));
        for proposal in &request.proposals {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!(
                    "── {} [{}] ──",
                    proposal.agent_name,
                    proposal.domain.display_name()
                )
                .yellow()
                .bold(),
                Self::indent(&truncate(&proposal.proposal, 1200), "  ")
            ));
        }

        output.push_str(&Self::section_header("Synthesized Proposal"));
        output.push_str(&format!(
            "\n{} {:.0}%\n\n{}\n",
            "Confidence:".cyan().bold(),
            request.synthesis.confidence * 100.0,
            request.synthesis.hybrid_proposal
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format the final result in the requested format
    pub fn format_result(result: &DebateResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Summary => Self::format_summary(result),
        }
    }

    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_summary(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Agent Council Result ===".cyan().bold()
        ));

        if !result.success {
            output.push_str(&format!("{}\n", "No change set was produced.".red()));
            return output;
        }

        if result.scaffolded {
            output.push_str(&format!(
                "{}\n\n",
                "Generated code failed the quality gate; a scaffold was produced instead."
                    .yellow()
            ));
        }

        output.push_str(&format!("{}\n", "Approved proposal:".bold()));
        output.push_str(&Self::indent(&truncate(&result.proposal, 2000), "  "));
        output.push_str("\n\n");

        output.push_str(&format!("{}\n", "File changes:".bold()));
        for change in &result.file_changes {
            let action = match change.action {
                FileAction::Create => "create".green(),
                FileAction::Update => "update".yellow(),
                FileAction::Delete => "delete".red(),
            };
            output.push_str(&format!(
                "  {:<8} {} {}\n",
                action,
                change.path,
                format!("({} bytes)", change.content.len()).dimmed()
            ));
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
