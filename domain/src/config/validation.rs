//! Structured configuration issues with severity levels.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field did not parse into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is outside its accepted range.
    OutOfRange { field: String },
    /// A required value is empty.
    EmptyValue { field: String },
    /// Two entries share an identifier.
    DuplicateId { id: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors_only_counts_errors() {
        let warning = ConfigIssue::warning(
            ConfigIssueCode::EmptyValue {
                field: "agents.name".to_string(),
            },
            "empty name",
        );
        assert!(!ConfigIssue::has_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue::error(
            ConfigIssueCode::OutOfRange {
                field: "engine.max_concurrency".to_string(),
            },
            "must be at least 1",
        );
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }
}
