//! Shell-command code check (lint, typecheck)
//!
//! Runs a configured command through `sh -c` in the project directory and
//! maps its exit status to a [`CheckReport`]. Paths of the changes under
//! review are exported as `COUNCIL_CHANGED_FILES`, one per line.

use async_trait::async_trait;
use council_application::{CheckError, CheckReport, CodeCheckPort};
use council_domain::{FileAction, FileChange};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit status `sh` uses when the program is not found.
const COMMAND_NOT_FOUND: i32 = 127;

/// Diagnostics kept from a failing run.
const MAX_DIAGNOSTICS: usize = 20;

pub struct ShellCodeCheck {
    name: String,
    command: String,
    working_dir: PathBuf,
    timeout: Duration,
}

impl ShellCodeCheck {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            working_dir: PathBuf::from("."),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_command(&self, changes: &[FileChange]) -> Command {
        let changed: Vec<&str> = changes
            .iter()
            .filter(|c| c.action != FileAction::Delete)
            .map(|c| c.path.as_str())
            .collect();

        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", &self.command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", &self.command]);
            c
        };
        cmd.current_dir(&self.working_dir)
            .env("COUNCIL_CHANGED_FILES", changed.join("\n"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CodeCheckPort for ShellCodeCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, changes: &[FileChange]) -> Result<CheckReport, CheckError> {
        if self.command.trim().is_empty() {
            return Ok(CheckReport::passed());
        }
        debug!("Running {} check: {}", self.name, self.command);

        let child = match self.build_command(changes).spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} check skipped, shell not found: {}", self.name, e);
                return Ok(CheckReport::passed());
            }
            Err(e) => return Err(CheckError::Spawn(e.to_string())),
        };

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CheckError::Timeout(self.timeout.as_secs()))??;

        if output.status.success() {
            return Ok(CheckReport::passed());
        }

        if output.status.code() == Some(COMMAND_NOT_FOUND) {
            warn!(
                "{} check skipped, command not found: {}",
                self.name, self.command
            );
            return Ok(CheckReport::passed());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(CheckReport::failed(collect_diagnostics(&stdout, &stderr)))
    }
}

/// Lines mentioning an error, or the tail of the output if none do.
fn collect_diagnostics(stdout: &str, stderr: &str) -> Vec<String> {
    let lines: Vec<&str> = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let errors: Vec<String> = lines
        .iter()
        .filter(|line| line.to_lowercase().contains("error"))
        .take(MAX_DIAGNOSTICS)
        .map(|line| line.to_string())
        .collect();
    if !errors.is_empty() {
        return errors;
    }

    let skip = lines.len().saturating_sub(MAX_DIAGNOSTICS);
    lines[skip..].iter().map(|line| line.to_string()).collect()
}
