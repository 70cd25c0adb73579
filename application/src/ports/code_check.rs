//! Automated code check port (lint, typecheck)

use async_trait::async_trait;
use council_domain::FileChange;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Check could not be started: {0}")]
    Spawn(String),

    #[error("Check timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub passed: bool,
    pub error_count: usize,
    pub diagnostics: Vec<String>,
}

impl CheckReport {
    pub fn passed() -> Self {
        Self {
            passed: true,
            error_count: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostics: Vec<String>) -> Self {
        Self {
            passed: false,
            error_count: diagnostics.len().max(1),
            diagnostics,
        }
    }
}

#[async_trait]
pub trait CodeCheckPort: Send + Sync {
    /// Short label for logs, e.g. `lint`.
    fn name(&self) -> &str;

    async fn check(&self, changes: &[FileChange]) -> Result<CheckReport, CheckError>;
}

/// Check that always passes. Used when no command is configured.
pub struct SkipCheck {
    name: String,
}

impl SkipCheck {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl CodeCheckPort for SkipCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, _changes: &[FileChange]) -> Result<CheckReport, CheckError> {
        Ok(CheckReport::passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_report_counts_at_least_one_error() {
        let report = CheckReport::failed(Vec::new());
        assert!(!report.passed);
        assert_eq!(report.error_count, 1);

        let report = CheckReport::failed(vec!["a".into(), "b".into()]);
        assert_eq!(report.error_count, 2);
    }

    #[tokio::test]
    async fn test_skip_check_passes() {
        let check = SkipCheck::new("lint");
        assert_eq!(check.name(), "lint");
        assert_eq!(check.check(&[]).await.unwrap(), CheckReport::passed());
    }
}
