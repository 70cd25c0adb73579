//! Interactive approval of synthesized proposals.
//!
//! When a debate reaches `AWAITING_USER_APPROVAL` the user sees every
//! agent's proposal and the merged one, then answers at a prompt:
//!
//! ```text
//! Commands:
//!   approve            - Generate code from this proposal
//!   refine <feedback>  - Run another round with your feedback
//!   abort              - Cancel the debate
//!
//! council>
//! ```
//!
//! | Command | Aliases |
//! |---------|---------|
//! | `approve` | `/approve`, `a`, `y` |
//! | `refine <feedback>` | `/refine`, `r` |
//! | `abort` | `/abort`, `q`, `quit` |

use crate::output::console::ConsoleRenderer;
use colored::Colorize;
use council_domain::UserApprovalRequest;
use std::io::{BufRead, Write};
use thiserror::Error;

/// What the user decided at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalCommand {
    Approve,
    Refine(String),
    Abort,
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed before a decision was made")]
    InputClosed,
}

/// Parse one line of input. `Err` carries a hint for the user.
pub fn parse_command(input: &str) -> Result<ApprovalCommand, String> {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.trim_start_matches('/').to_lowercase().as_str() {
        "approve" | "a" | "y" | "yes" => Ok(ApprovalCommand::Approve),
        "refine" | "r" => {
            if rest.is_empty() {
                Err("refine needs feedback, e.g. `refine keep the public API`".to_string())
            } else {
                Ok(ApprovalCommand::Refine(rest.to_string()))
            }
        }
        "abort" | "q" | "quit" => Ok(ApprovalCommand::Abort),
        "" => Err("Type a command".to_string()),
        other => Err(format!(
            "Unknown command: {}. Use approve, refine <feedback> or abort",
            other
        )),
    }
}

/// Terminal approval prompt over any reader/writer pair.
pub struct ApprovalPrompt<R, W> {
    input: R,
    output: W,
}

impl ApprovalPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ApprovalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the request and block until the user gives a valid command.
    pub fn ask(&mut self, request: &UserApprovalRequest) -> Result<ApprovalCommand, PromptError> {
        writeln!(
            self.output,
            "{}",
            ConsoleRenderer::format_approval_request(request)
        )?;
        self.print_commands()?;

        loop {
            write!(self.output, "{} ", "council>".magenta().bold())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::InputClosed);
            }

            match parse_command(&line) {
                Ok(command) => return Ok(command),
                Err(hint) => writeln!(self.output, "{}", hint.yellow())?,
            }
        }
    }

    fn print_commands(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "{}", "Commands:".cyan().bold())?;
        writeln!(
            self.output,
            "  {}            - Generate code from this proposal",
            "approve".green()
        )?;
        writeln!(
            self.output,
            "  {}  - Run another round with your feedback",
            "refine <feedback>".yellow()
        )?;
        writeln!(self.output, "  {}              - Cancel the debate", "abort".red())?;
        writeln!(self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AgentProfile, AgentProposal, AgentRole, DebateId, SynthesisResult};
    use std::io::Cursor;

    fn request() -> UserApprovalRequest {
        let profile = AgentProfile::new("sec", "Sam", AgentRole::Security);
        let proposals = vec![AgentProposal::new(&profile, "Hash the tokens")];
        let synthesis = SynthesisResult::new("Hash tokens at rest", &proposals, 1);
        UserApprovalRequest::new(DebateId::new(), 1, "secure tokens", proposals, synthesis)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("approve"), Ok(ApprovalCommand::Approve));
        assert_eq!(parse_command("  /A \n"), Ok(ApprovalCommand::Approve));
        assert_eq!(
            parse_command("refine   keep the API stable "),
            Ok(ApprovalCommand::Refine("keep the API stable".to_string()))
        );
        assert_eq!(parse_command("quit"), Ok(ApprovalCommand::Abort));
        assert!(parse_command("refine").is_err());
        assert!(parse_command("").is_err());
        assert!(parse_command("ship it").is_err());
    }

    #[test]
    fn test_ask_retries_until_valid() {
        colored::control::set_override(false);
        let input = Cursor::new("maybe\nrefine\nrefine add tests\n");
        let mut output = Vec::new();

        let command = ApprovalPrompt::new(input, &mut output)
            .ask(&request())
            .unwrap();
        assert_eq!(command, ApprovalCommand::Refine("add tests".to_string()));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Hash tokens at rest"));
        assert!(shown.contains("Unknown command: maybe"));
        assert!(shown.contains("refine needs feedback"));
        assert_eq!(shown.matches("council>").count(), 3);
    }

    #[test]
    fn test_ask_reports_closed_input() {
        let mut output = Vec::new();
        let err = ApprovalPrompt::new(Cursor::new(""), &mut output)
            .ask(&request())
            .unwrap_err();
        assert!(matches!(err, PromptError::InputClosed));
    }
}
