//! Agent activity display
//!
//! Driven by `agent-speaking` events: one spinner per agent while it is
//! thinking, finished with a tick or a cross.

use colored::Colorize;
use council_domain::{AgentId, DebateEvent, SpeakingStatus};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::Duration;

/// Consumes agent activity events.
pub trait ActivityView {
    fn on_activity(&mut self, agent: &AgentId, status: SpeakingStatus);

    /// Stop every running indicator, e.g. before prompting the user.
    fn clear(&mut self);

    /// Forward an event if it is agent activity.
    fn observe(&mut self, event: &DebateEvent) {
        if let DebateEvent::AgentSpeaking {
            agent_id, status, ..
        } = event
        {
            self.on_activity(agent_id, *status);
        }
    }
}

/// Spinners for agents that are currently working
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: HashMap<AgentId, ProgressBar>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: HashMap::new(),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Agents with a running spinner
    pub fn active(&self) -> usize {
        self.bars.len()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityView for ProgressReporter {
    fn on_activity(&mut self, agent: &AgentId, status: SpeakingStatus) {
        match status {
            SpeakingStatus::Thinking => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.set_prefix(agent.to_string());
                pb.set_message("thinking...");
                pb.enable_steady_tick(Duration::from_millis(120));
                if let Some(previous) = self.bars.insert(agent.clone(), pb) {
                    previous.finish_and_clear();
                }
            }
            SpeakingStatus::Done | SpeakingStatus::Failed => {
                let Some(pb) = self.bars.remove(agent) else {
                    return;
                };
                let mark = if status == SpeakingStatus::Done {
                    format!("{} done", "v".green())
                } else {
                    format!("{} failed", "x".red())
                };
                pb.finish_with_message(mark);
            }
        }
    }

    fn clear(&mut self) {
        for (_, pb) in self.bars.drain() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based activity (no fancy UI)
pub struct SimpleProgress;

impl ActivityView for SimpleProgress {
    fn on_activity(&mut self, agent: &AgentId, status: SpeakingStatus) {
        match status {
            SpeakingStatus::Thinking => println!("  {} {} thinking", "..".cyan(), agent),
            SpeakingStatus::Done => println!("  {} {}", "v".green(), agent),
            SpeakingStatus::Failed => println!("  {} {} (failed)", "x".red(), agent),
        }
    }

    fn clear(&mut self) {}
}

/// Activity view that shows nothing (`--quiet`)
pub struct NoProgress;

impl ActivityView for NoProgress {
    fn on_activity(&mut self, _agent: &AgentId, _status: SpeakingStatus) {}

    fn clear(&mut self) {}
}
