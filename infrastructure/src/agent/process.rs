//! Agent backed by an external command
//!
//! Each prompt spawns the configured program, writes the prompt to its
//! stdin and takes everything it prints on stdout as the reply. The program
//! owns model choice and credentials; this adapter only moves text.

use async_trait::async_trait;
use council_application::{Agent, AgentError};
use council_domain::AgentProfile;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

pub struct ProcessAgent {
    profile: AgentProfile,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessAgent {
    pub fn new(profile: AgentProfile, program: impl Into<String>) -> Self {
        Self {
            profile,
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AgentError::Unavailable(format!("{}: {}", self.program, e)))?;

        // Feed stdin while stdout is drained, or a chatty program blocks on a
        // full pipe and never reads the rest of the prompt.
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(prompt.as_bytes()).await?;
            }
            // Dropping stdin sends EOF
            Ok::<(), std::io::Error>(())
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|e| AgentError::RequestFailed(e.to_string()))?;
        // A program may exit without reading its input; its exit status decides.
        if let Err(e) = written
            && e.kind() != std::io::ErrorKind::BrokenPipe
        {
            return Err(AgentError::RequestFailed(e.to_string()));
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AgentError::RequestFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let reply = String::from_utf8(output.stdout)
            .map_err(|e| AgentError::InvalidResponse(e.to_string()))?;
        if reply.trim().is_empty() {
            return Err(AgentError::InvalidResponse("empty reply".to_string()));
        }
        Ok(reply)
    }
}

#[async_trait]
impl Agent for ProcessAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn process_message(&self, prompt: &str) -> Result<String, AgentError> {
        debug!(
            agent = %self.profile.id,
            bytes = prompt.len(),
            "Sending prompt to {}",
            self.program
        );
        match tokio::time::timeout(self.timeout, self.run(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(agent = %self.profile.id, "Agent timed out after {:?}", self.timeout);
                Err(AgentError::Timeout)
            }
        }
    }
}
