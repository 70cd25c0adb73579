//! Agent roles and the proposal domains they map to.

use serde::{Deserialize, Serialize};

/// Responsibility assigned to an agent at registration.
///
/// The orchestrator selects the synthesizer and the code generator by role,
/// never by matching on display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Merges proposals into the hybrid proposal.
    Orchestrator,
    /// System structure, module boundaries, data flow.
    Architect,
    /// Threat model, validation, secrets handling.
    Security,
    /// User-facing behavior and interaction design.
    Ux,
    /// Model usage, prompting, evaluation.
    Ai,
    /// Writes the code change set.
    Implementation,
    /// No specialty.
    #[default]
    General,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Orchestrator => "orchestrator",
            AgentRole::Architect => "architect",
            AgentRole::Security => "security",
            AgentRole::Ux => "ux",
            AgentRole::Ai => "ai",
            AgentRole::Implementation => "implementation",
            AgentRole::General => "general",
        }
    }

    /// Domain this role argues from during the proposal phase.
    pub fn domain(&self) -> ProposalDomain {
        match self {
            AgentRole::Architect => ProposalDomain::Architecture,
            AgentRole::Security => ProposalDomain::Security,
            AgentRole::Ux => ProposalDomain::Ux,
            AgentRole::Ai => ProposalDomain::Ai,
            AgentRole::Implementation => ProposalDomain::Implementation,
            AgentRole::Orchestrator | AgentRole::General => ProposalDomain::General,
        }
    }

    /// Lenient parse used for configuration values.
    ///
    /// Unrecognized strings map to [`AgentRole::General`]; use
    /// [`str::parse`] when an unknown role should be reported instead.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "orchestrator" | "moderator" | "synthesizer" => Ok(AgentRole::Orchestrator),
            "architect" | "architecture" => Ok(AgentRole::Architect),
            "security" | "sec" => Ok(AgentRole::Security),
            "ux" | "designer" | "design" => Ok(AgentRole::Ux),
            "ai" | "ml" => Ok(AgentRole::Ai),
            "implementation" | "implementer" | "impl" | "coder" => Ok(AgentRole::Implementation),
            "general" => Ok(AgentRole::General),
            other => Err(format!(
                "Unknown agent role: {}. Valid: orchestrator, architect, security, ux, ai, implementation, general",
                other
            )),
        }
    }
}

/// Perspective an agent's proposal is written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalDomain {
    Architecture,
    Security,
    Ux,
    Ai,
    Implementation,
    General,
}

impl ProposalDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalDomain::Architecture => "architecture",
            ProposalDomain::Security => "security",
            ProposalDomain::Ux => "ux",
            ProposalDomain::Ai => "ai",
            ProposalDomain::Implementation => "implementation",
            ProposalDomain::General => "general",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProposalDomain::Architecture => "Architecture",
            ProposalDomain::Security => "Security",
            ProposalDomain::Ux => "User Experience",
            ProposalDomain::Ai => "AI / ML",
            ProposalDomain::Implementation => "Implementation",
            ProposalDomain::General => "General",
        }
    }
}

impl std::fmt::Display for ProposalDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_domain_mapping() {
        assert_eq!(AgentRole::Architect.domain(), ProposalDomain::Architecture);
        assert_eq!(AgentRole::Security.domain(), ProposalDomain::Security);
        assert_eq!(AgentRole::Ux.domain(), ProposalDomain::Ux);
        assert_eq!(AgentRole::Ai.domain(), ProposalDomain::Ai);
        assert_eq!(
            AgentRole::Implementation.domain(),
            ProposalDomain::Implementation
        );
        assert_eq!(AgentRole::Orchestrator.domain(), ProposalDomain::General);
        assert_eq!(AgentRole::General.domain(), ProposalDomain::General);
    }

    #[test]
    fn test_parse_role_aliases() {
        assert_eq!("Architect".parse::<AgentRole>(), Ok(AgentRole::Architect));
        assert_eq!("coder".parse::<AgentRole>(), Ok(AgentRole::Implementation));
        assert_eq!("moderator".parse::<AgentRole>(), Ok(AgentRole::Orchestrator));
        assert_eq!(" ML ".parse::<AgentRole>(), Ok(AgentRole::Ai));
        assert!("poet".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_parse_lenient_falls_back_to_general() {
        assert_eq!(AgentRole::parse_lenient("poet"), AgentRole::General);
        assert_eq!(AgentRole::parse_lenient("ux"), AgentRole::Ux);
    }

    #[test]
    fn test_role_serde_roundtrip_names() {
        let json = serde_json::to_string(&AgentRole::Implementation).unwrap();
        assert_eq!(json, "\"implementation\"");
        let domain = serde_json::to_string(&ProposalDomain::Ux).unwrap();
        assert_eq!(domain, "\"ux\"");
    }
}
