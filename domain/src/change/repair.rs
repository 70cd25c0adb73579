//! Recover a change set from unreliable model output.
//!
//! The implementation agent is asked for a JSON array of
//! `{path, action, content}` objects. What comes back may be fenced, wrapped
//! in prose, carry trailing commas or contain raw newlines inside strings.
//! Three stages run in order and the first that yields at least one change
//! wins:
//!
//! 1. [`RepairStage::Json`]: strip fences, slice the outermost `[...]`,
//!    sanitize, parse.
//! 2. [`RepairStage::Pattern`]: regex extraction of `path`/`action`/`content`
//!    triples from text that is too broken to parse.
//! 3. [`RepairStage::Fallback`]: the whole output as a single markdown file.
//!
//! Nothing here can fail or panic; the fallback always produces one change.

use super::file_change::{FileAction, FileChange};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Path of the file produced when nothing structured could be recovered.
pub const FALLBACK_PATH: &str = "generated/debate_output.md";

static TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)"path"\s*:\s*"((?:[^"\\]|\\.)*)"\s*,\s*"action"\s*:\s*"([A-Za-z]+)"\s*,\s*"content"\s*:\s*"((?:[^"\\]|\\.)*)""#,
    )
    .expect("TRIPLE regex should compile")
});

/// Which stage produced the change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairStage {
    Json,
    Pattern,
    Fallback,
}

impl std::fmt::Display for RepairStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepairStage::Json => write!(f, "json"),
            RepairStage::Pattern => write!(f, "pattern"),
            RepairStage::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub changes: Vec<FileChange>,
    pub stage: RepairStage,
}

/// Recover changes from `raw`. Never empty.
pub fn repair(raw: &str) -> Vec<FileChange> {
    repair_with_objective(raw, "").changes
}

/// Like [`repair`], reporting the stage used. The objective is recorded in
/// the fallback file so the output stays traceable.
pub fn repair_with_objective(raw: &str, objective: &str) -> RepairOutcome {
    if let Some(changes) = parse_json_stage(raw) {
        return RepairOutcome {
            changes,
            stage: RepairStage::Json,
        };
    }

    if let Some(changes) = parse_pattern_stage(raw) {
        return RepairOutcome {
            changes,
            stage: RepairStage::Pattern,
        };
    }

    RepairOutcome {
        changes: vec![fallback_change(raw, objective)],
        stage: RepairStage::Fallback,
    }
}

fn parse_json_stage(raw: &str) -> Option<Vec<FileChange>> {
    let unfenced = strip_fences(raw);
    let start = unfenced.find('[')?;
    let end = unfenced.rfind(']')?;
    if end < start {
        return None;
    }
    let sliced = &unfenced[start..=end];

    let value = serde_json::from_str::<serde_json::Value>(sliced)
        .or_else(|_| serde_json::from_str::<serde_json::Value>(&sanitize(sliced)))
        .ok()?;

    let changes: Vec<FileChange> = value
        .as_array()?
        .iter()
        .filter_map(change_from_value)
        .collect();

    (!changes.is_empty()).then_some(changes)
}

/// Drop every line that opens or closes a markdown fence.
fn strip_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape raw control characters inside string literals and remove trailing
/// commas before `]` or `}` outside them.
fn sanitize(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(c);
                }
            }
            c => out.push(c),
        }
    }

    out
}

fn change_from_value(value: &serde_json::Value) -> Option<FileChange> {
    // Paths are kept verbatim; only blank ones are dropped.
    let path = value.get("path")?.as_str()?;
    if path.trim().is_empty() {
        return None;
    }

    let action = match value.get("action").and_then(|v| v.as_str()) {
        Some(action) => action.parse::<FileAction>().ok()?,
        None => FileAction::Create,
    };

    let content = value
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let original_content = value
        .get("originalContent")
        .or_else(|| value.get("original_content"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Some(FileChange {
        path: path.to_string(),
        action,
        content,
        original_content,
    })
}

fn parse_pattern_stage(raw: &str) -> Option<Vec<FileChange>> {
    let changes: Vec<FileChange> = TRIPLE
        .captures_iter(raw)
        .filter_map(|captures| {
            let path = unescape(&captures[1]);
            let action = captures[2].parse::<FileAction>().ok()?;
            if path.trim().is_empty() {
                return None;
            }
            Some(FileChange::new(path, action, unescape(&captures[3])))
        })
        .collect();

    (!changes.is_empty()).then_some(changes)
}

/// Decode JSON string escapes. Unknown or truncated escapes are kept verbatim.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => match decode_unicode(&mut chars) {
                Some(decoded) => out.push(decoded),
                None => out.push_str("\\u"),
            },
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Decode the `XXXX` following `\u`, joining a UTF-16 surrogate pair when
/// the low half follows as another `\uXXXX`. Input is consumed only when a
/// character comes out.
fn decode_unicode(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let mut ahead = chars.clone();
    let high = hex4(&mut ahead)?;
    let decoded = if (0xD800..0xDC00).contains(&high) {
        if ahead.next() != Some('\\') || ahead.next() != Some('u') {
            return None;
        }
        let low = hex4(&mut ahead)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?
    } else {
        char::from_u32(high)?
    };
    *chars = ahead;
    Some(decoded)
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

fn fallback_change(raw: &str, objective: &str) -> FileChange {
    let mut content = String::from("# Debate Output\n\n");
    if !objective.trim().is_empty() {
        content.push_str(&format!("> Objective: {}\n\n", objective.trim()));
    }
    let body = raw.trim();
    if body.is_empty() {
        content.push_str("_The implementation agent returned no output._\n");
    } else {
        content.push_str(body);
        content.push('\n');
    }
    FileChange::create(FALLBACK_PATH, content)
}
