//! Extract decisions from free-form agent replies.
//!
//! Pure text matching over untrusted model output. Every function has a
//! conservative default when the reply is ambiguous.
//!
//! | Function | Use | Looks for |
//! |----------|-----|-----------|
//! | [`parse_review_response`] | vote casting | APPROVE / REJECT / ABSTAIN |
//! | [`parse_review_pass`] | QC agent review | APPROVED or a score |

use super::vote::Verdict;
use regex::Regex;
use std::sync::LazyLock;

static FRACTION_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}(?:\.\d+)?)\s*/\s*10\b").expect("FRACTION_SCORE regex should compile")
});

static LABELED_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:score|rating)\b\s*[:=]?\s*(\d{1,2}(?:\.\d+)?)")
        .expect("LABELED_SCORE regex should compile")
});

/// Map a review reply to a verdict.
///
/// Negated approvals ("NOT APPROVE", "CANNOT APPROVE") and any REJECT/REVISE
/// keyword win over an approval keyword. Replies with neither side default
/// to [`Verdict::Abstain`].
pub fn parse_review_response(response: &str) -> Verdict {
    let upper = response.to_uppercase();

    let negated = ["NOT APPROVE", "DON'T APPROVE", "CANNOT APPROVE"]
        .iter()
        .any(|phrase| upper.contains(phrase));
    let rejected = negated || upper.contains("REJECT") || upper.contains("REVISE");
    let approved = upper.contains("APPROVE");

    if rejected {
        Verdict::Reject
    } else if approved {
        Verdict::Approve
    } else {
        Verdict::Abstain
    }
}

/// Whether a QC review reply counts as a pass: the word `APPROVED`
/// (case-insensitive, not preceded by NOT), or a score of at least
/// `pass_score`.
///
/// Other wording in the reply does not cancel an approval; reviewers often
/// approve and suggest follow-ups in the same breath.
///
/// ```
/// use council_domain::quorum::parse_review_pass;
///
/// assert!(parse_review_pass("Approved, though you may revise names later", 7.0));
/// assert!(parse_review_pass("2 nits, overall 8", 7.0));
/// assert!(!parse_review_pass("NOT APPROVED: leaks secrets", 7.0));
/// ```
pub fn parse_review_pass(response: &str, pass_score: f64) -> bool {
    let upper = response.to_uppercase();
    let approved = upper.contains("APPROVED")
        && !["NOT APPROVED", "DISAPPROVED", "UNAPPROVED"]
            .iter()
            .any(|phrase| upper.contains(phrase));
    if approved {
        return true;
    }
    extract_score(response).is_some_and(|score| score >= pass_score)
}

/// Score on a 1-10 scale.
///
/// An explicit score wins: a JSON object with a `score` field, `N/10` or
/// `score: N`. Otherwise the highest standalone number between 1 and 10 is
/// taken, so counts of findings ahead of the verdict do not hide it.
fn extract_score(response: &str) -> Option<f64> {
    if let Some(start) = response.find('{')
        && let Some(end) = response.rfind('}')
        && end > start
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(&response[start..=end])
        && let Some(score) = value.get("score").and_then(|v| v.as_f64())
    {
        return Some(score.clamp(1.0, 10.0));
    }

    for pattern in [&*FRACTION_SCORE, &*LABELED_SCORE] {
        if let Some(captures) = pattern.captures(response)
            && let Ok(score) = captures[1].parse::<f64>()
        {
            return Some(score.clamp(1.0, 10.0));
        }
    }

    response
        .split_whitespace()
        .filter_map(|word| {
            word.trim_matches(|c: char| !c.is_ascii_digit())
                .parse::<f64>()
                .ok()
        })
        .filter(|n| (1.0..=10.0).contains(n))
        .reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_keywords() {
        assert_eq!(parse_review_response("I APPROVE this."), Verdict::Approve);
        assert_eq!(parse_review_response("approved, ship it"), Verdict::Approve);
        assert_eq!(parse_review_response("REJECT: unsafe"), Verdict::Reject);
        assert_eq!(parse_review_response("Please revise"), Verdict::Reject);
        assert_eq!(parse_review_response("I cannot approve"), Verdict::Reject);
        assert_eq!(parse_review_response("Some thoughts"), Verdict::Abstain);
    }

    #[test]
    fn test_review_pass_on_keyword() {
        assert!(parse_review_pass("APPROVED - nothing to add", 7.0));
        assert!(parse_review_pass("approved", 7.0));
        assert!(!parse_review_pass("NOT APPROVED", 7.0));
        assert!(!parse_review_pass("Disapproved: no tests", 7.0));
    }

    #[test]
    fn test_review_pass_ignores_follow_up_wording() {
        assert!(parse_review_pass(
            "APPROVED - ship it; maybe revise the names later.",
            7.0
        ));
        assert!(parse_review_pass("Approved. I would reject a larger diff.", 7.0));
    }

    #[test]
    fn test_review_pass_on_score() {
        assert!(parse_review_pass("Score: 8", 7.0));
        assert!(parse_review_pass("I'd give it 7/10", 7.0));
        assert!(!parse_review_pass("Score: 6", 7.0));
        assert!(!parse_review_pass("looks risky", 7.0));
    }

    #[test]
    fn test_review_pass_takes_highest_bare_number() {
        assert!(parse_review_pass("Found 2 minor issues, overall 8", 7.0));
        assert!(!parse_review_pass("Found 2 minor issues, overall 6", 7.0));
    }

    #[test]
    fn test_explicit_score_beats_bare_numbers() {
        // 9 files touched, but the reviewer's score is 5
        assert_eq!(extract_score("Touches 9 files. Score: 5"), Some(5.0));
        assert!(!parse_review_pass("Touches 9 files. Score: 5", 7.0));
    }

    #[test]
    fn test_score_formats() {
        assert_eq!(extract_score(r#"{"score": 9}"#), Some(9.0));
        assert_eq!(
            extract_score("```json\n{\"score\": 6, \"reasoning\": \"meh\"}\n```"),
            Some(6.0)
        );
        assert_eq!(extract_score("rating = 4"), Some(4.0));
        assert_eq!(extract_score("My score is 9"), Some(9.0));
    }

    #[test]
    fn test_score_clamps_and_misses() {
        assert_eq!(extract_score(r#"{"score": 15}"#), Some(10.0));
        assert_eq!(extract_score(r#"{"score": -3}"#), Some(1.0));
        assert_eq!(extract_score(""), None);
        assert_eq!(extract_score("error 404"), None);
    }
}
