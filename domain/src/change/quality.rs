//! Static heuristics that reject stub-like generated code.
//!
//! A failing file discards the whole change set. Matching is deliberately
//! crude: lowered substring search, so identifiers such as `mockFactory`
//! trip the placeholder check too.

use super::file_change::{FileAction, FileChange};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const MARKERS: &[&str] = &["todo", "fixme"];

const STUB_PHRASES: &[&str] = &["not implemented", "unimplemented!"];

const PLACEHOLDER_TERMS: &[&str] = &[
    "placeholder",
    "mock",
    "stub",
    "dummy",
    "fake",
    "implement me",
    "your code here",
    "lorem ipsum",
];

const DEBUG_PRINTS: &[&str] = &[
    "console.log(",
    "print(",
    "println!(",
    "dbg!(",
    "system.out.println",
    "fmt.println",
];

const MAX_DEBUG_PRINTS: usize = 3;
const MIN_MEANINGFUL_LINES: usize = 3;

static EMPTY_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bfunction\b[^{;]*|=>\s*|\bfn\s+\w+[^{;]*|\)\s*)\{\s*\}")
        .expect("EMPTY_BODY regex should compile")
});

/// Result of [`validate`]. `reason` names the first offending file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub ok: bool,
    pub reason: Option<String>,
}

impl QualityVerdict {
    pub fn pass() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

/// Check every non-delete change. Empty change sets pass.
pub fn validate(changes: &[FileChange]) -> QualityVerdict {
    for change in changes.iter().filter(|c| c.action != FileAction::Delete) {
        if let Some(problem) = inspect(&change.content) {
            return QualityVerdict::fail(format!("{}: {}", change.path, problem));
        }
    }
    QualityVerdict::pass()
}

fn inspect(content: &str) -> Option<String> {
    let lowered = content.to_lowercase();

    if let Some(marker) = MARKERS.iter().find(|m| lowered.contains(*m)) {
        return Some(format!("contains {} marker", marker.to_uppercase()));
    }

    if let Some(phrase) = STUB_PHRASES.iter().find(|p| lowered.contains(*p)) {
        return Some(format!("contains stub \"{}\"", phrase));
    }

    if let Some(term) = PLACEHOLDER_TERMS.iter().find(|t| lowered.contains(*t)) {
        return Some(format!("contains placeholder term \"{}\"", term));
    }

    let has_body_token =
        content.contains("return") || content.contains("this.") || content.contains("super(");
    if !has_body_token && EMPTY_BODY.is_match(content) {
        return Some("contains an empty function body".to_string());
    }

    let prints: usize = DEBUG_PRINTS
        .iter()
        .map(|p| lowered.matches(p).count())
        .sum();
    if prints > MAX_DEBUG_PRINTS {
        return Some(format!("contains {} debug print statements", prints));
    }

    let meaningful = meaningful_lines(content);
    if meaningful < MIN_MEANINGFUL_LINES {
        return Some(format!(
            "only {} meaningful line(s), expected at least {}",
            meaningful, MIN_MEANINGFUL_LINES
        ));
    }

    None
}

/// Non-blank lines that are neither imports nor comments.
fn meaningful_lines(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_import(line) && !is_comment(line))
        .count()
}

fn is_import(line: &str) -> bool {
    ["import ", "use ", "from ", "require(", "#include"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
        || line.contains("= require(")
}

fn is_comment(line: &str) -> bool {
    if line.starts_with("#[") || line.starts_with("#!") {
        return false;
    }
    ["//", "/*", "*", "#", "--", "<!--"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}
