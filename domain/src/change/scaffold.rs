//! Deterministic replacement for generated code that failed the quality gate.

use super::file_change::FileChange;

const SCAFFOLD_DIR: &str = "generated";
const MAX_SLUG_LEN: usize = 48;

/// Build the scaffold change set for an objective and its approved proposal.
///
/// The result depends only on its inputs: the same objective and proposal
/// always produce the same path and content.
pub fn scaffold(objective: &str, proposal: &str) -> Vec<FileChange> {
    let path = format!("{}/{}.md", SCAFFOLD_DIR, slug(objective));

    let mut content = format!("# {}\n\n", title(objective));
    content.push_str("Generated from the approved debate proposal because the\n");
    content.push_str("implementation output did not pass automated quality checks.\n\n");
    content.push_str("## Approved proposal\n\n");
    let proposal = proposal.trim();
    if proposal.is_empty() {
        content.push_str("(no proposal text)\n");
    } else {
        content.push_str(proposal);
        content.push('\n');
    }

    vec![FileChange::create(path, content)]
}

fn title(objective: &str) -> String {
    let first_line = objective.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        "Debate objective".to_string()
    } else {
        first_line.to_string()
    }
}

fn slug(objective: &str) -> String {
    let mut slug = String::new();
    for c in objective.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "debate-scaffold".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_is_deterministic() {
        let a = scaffold("Add a login page!", "Use OAuth.");
        let b = scaffold("Add a login page!", "Use OAuth.");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].path, "generated/add-a-login-page.md");
        assert!(a[0].content.starts_with("# Add a login page!\n"));
        assert!(a[0].content.contains("Use OAuth."));
    }

    #[test]
    fn test_slug_edge_cases() {
        assert_eq!(slug("???"), "debate-scaffold");
        assert_eq!(slug(""), "debate-scaffold");
        assert!(slug(&"word ".repeat(40)).len() <= MAX_SLUG_LEN);
        assert_eq!(slug("  Résumé parser  "), "r-sum-parser");
    }
}
