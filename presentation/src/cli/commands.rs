//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How the final debate result is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Proposal and a table of file changes
    Summary,
    /// The `DebateResult` as JSON
    Json,
}

/// CLI arguments for agent-council
#[derive(Parser, Debug)]
#[command(name = "agent-council")]
#[command(author, version, about = "Agent Council - Agents debate a change, you approve it")]
#[command(long_about = r#"
Agent Council runs a debate between configured agents and turns the result into code.

The protocol has five phases:
1. Proposals: every agent proposes from its own domain, in parallel
2. Synthesis: the orchestrator agent merges proposals into one
3. Approval: you approve the merged proposal or ask for another round
4. Code generation: the implementation agent writes the change set
5. Quality review: lint, typecheck and agent reviews check the code

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/agent-council/config.toml   Global config

Example:
  agent-council run "Add rate limiting to the login endpoint"
  agent-council run --auto-approve -o json "Extract the payment client"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format for the final result
    #[arg(short, long, value_enum, default_value = "summary", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostics to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Debate an objective and produce a change set
    Run {
        /// What the agents should build or change
        objective: String,

        /// Approve the first synthesized proposal without asking
        #[arg(long)]
        auto_approve: bool,
    },
}
