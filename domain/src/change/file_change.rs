//! File-level changes proposed by the implementation agent.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Update,
    Delete,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileAction::Create => "create",
            FileAction::Update => "update",
            FileAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepts the synonyms models tend to use in place of the canonical names.
impl std::str::FromStr for FileAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" | "add" | "new" | "write" => Ok(FileAction::Create),
            "update" | "modify" | "edit" | "replace" => Ok(FileAction::Update),
            "delete" | "remove" => Ok(FileAction::Delete),
            other => Err(DomainError::UnknownFileAction(other.to_string())),
        }
    }
}

/// One file to create, update or delete.
///
/// Serialized with camelCase keys (`originalContent`), the same shape the
/// implementation agent is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub path: String,
    pub action: FileAction,
    #[serde(default)]
    pub content: String,
    /// Pre-change content, filled in for updates before execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}

impl FileChange {
    pub fn new(path: impl Into<String>, action: FileAction, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action,
            content: content.into(),
            original_content: None,
        }
    }

    pub fn create(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, FileAction::Create, content)
    }

    pub fn update(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, FileAction::Update, content)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path, FileAction::Delete, "")
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original_content = Some(original.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_synonyms() {
        assert_eq!("modify".parse::<FileAction>(), Ok(FileAction::Update));
        assert_eq!("ADD".parse::<FileAction>(), Ok(FileAction::Create));
        assert_eq!(" remove ".parse::<FileAction>(), Ok(FileAction::Delete));
        assert_eq!(
            "rename".parse::<FileAction>(),
            Err(DomainError::UnknownFileAction("rename".to_string()))
        );
    }

    #[test]
    fn test_original_content_key() {
        let change = FileChange::update("src/a.ts", "new").with_original("old");
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["originalContent"], "old");
        assert_eq!(json["action"], "update");

        let json = serde_json::to_value(FileChange::create("b.ts", "x")).unwrap();
        assert!(json.get("originalContent").is_none());
    }
}
