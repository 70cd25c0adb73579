//! Debate protocol configuration from TOML (`[debate]` section)

use council_application::{DebateConfig, QcPolicy};
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw debate configuration from TOML
///
/// # Example
///
/// ```toml
/// [debate]
/// approval_timeout_secs = 420
/// max_rounds = 3
/// qc_policy = "warn_only"      # or "block"
/// review_pass_ratio = 0.7
/// review_pass_score = 7.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Seconds to wait for a human decision before the debate fails
    pub approval_timeout_secs: u64,
    /// Proposal rounds allowed, counting the first one
    pub max_rounds: usize,
    /// What a failed quality review does: "warn_only" or "block"
    pub qc_policy: String,
    /// Share of reviewing agents that must pass the code
    pub review_pass_ratio: f64,
    /// Minimum review score (1-10) counted as a pass
    pub review_pass_score: f64,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let defaults = DebateConfig::default();
        Self {
            approval_timeout_secs: defaults.approval_timeout.as_secs(),
            max_rounds: defaults.max_rounds,
            qc_policy: defaults.qc_policy.to_string(),
            review_pass_ratio: defaults.review_pass_ratio,
            review_pass_score: defaults.review_pass_score,
        }
    }
}

impl FileDebateConfig {
    /// Parse qc_policy, falling back to the default on unknown values.
    pub fn parse_qc_policy(&self) -> (QcPolicy, Vec<ConfigIssue>) {
        match self.qc_policy.parse::<QcPolicy>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "debate.qc_policy".to_string(),
                        value: self.qc_policy.clone(),
                        valid_values: vec!["warn_only".to_string(), "block".to_string()],
                    },
                    format!(
                        "debate.qc_policy: unknown value '{}', falling back to 'warn_only'",
                        self.qc_policy
                    ),
                );
                (QcPolicy::default(), vec![issue])
            }
        }
    }

    /// Range checks for the numeric fields.
    pub fn validate_ranges(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "debate.max_rounds".to_string(),
                },
                "debate.max_rounds: must be at least 1, using 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.review_pass_ratio) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "debate.review_pass_ratio".to_string(),
                },
                format!(
                    "debate.review_pass_ratio: {} is outside 0.0..=1.0",
                    self.review_pass_ratio
                ),
            ));
        }

        if !(1.0..=10.0).contains(&self.review_pass_score) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "debate.review_pass_score".to_string(),
                },
                format!(
                    "debate.review_pass_score: {} is outside 1..=10",
                    self.review_pass_score
                ),
            ));
        }

        if self.approval_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "debate.approval_timeout_secs".to_string(),
                },
                "debate.approval_timeout_secs: cannot be 0",
            ));
        }

        issues
    }

    pub fn to_debate_config(&self) -> DebateConfig {
        let mut config = DebateConfig::default()
            .with_approval_timeout(Duration::from_secs(self.approval_timeout_secs))
            .with_max_rounds(self.max_rounds)
            .with_qc_policy(self.parse_qc_policy().0);
        config.review_pass_ratio = self.review_pass_ratio;
        config.review_pass_score = self.review_pass_score;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        let file = FileDebateConfig::default();
        assert_eq!(file.approval_timeout_secs, 420);
        assert_eq!(file.max_rounds, 3);
        assert_eq!(file.qc_policy, "warn_only");
        assert!(file.validate_ranges().is_empty());
        assert!(file.parse_qc_policy().1.is_empty());
    }

    #[test]
    fn test_unknown_qc_policy_warns() {
        let file = FileDebateConfig {
            qc_policy: "strict".to_string(),
            ..Default::default()
        };
        let (policy, issues) = file.parse_qc_policy();
        assert_eq!(policy, QcPolicy::WarnOnly);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "debate.qc_policy"
        ));
    }

    #[test]
    fn test_ratio_out_of_range_is_error() {
        let file = FileDebateConfig {
            review_pass_ratio: 1.5,
            ..Default::default()
        };
        let issues = file.validate_ranges();
        assert!(ConfigIssue::has_errors(&issues));
    }

    #[test]
    fn test_to_debate_config() {
        let file = FileDebateConfig {
            approval_timeout_secs: 30,
            max_rounds: 5,
            qc_policy: "block".to_string(),
            review_pass_ratio: 0.5,
            review_pass_score: 8.0,
        };
        let config = file.to_debate_config();
        assert_eq!(config.approval_timeout, Duration::from_secs(30));
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.qc_policy, QcPolicy::Block);
        assert_eq!(config.review_pass_ratio, 0.5);
        assert_eq!(config.review_pass_score, 8.0);
    }
}
