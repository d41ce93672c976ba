//! Outfit rating results and the strict reply grammar they are parsed from.
//!
//! The rating prompt asks the model to answer in exactly this shape:
//!
//! ```text
//! SCORE: 8
//! EXPLANATION: Great contrast between the navy blazer and the white shirt.
//! TIPS:
//! - Swap the sneakers for loafers.
//! ```
//!
//! Anything else is rejected with [`Error::Parse`]; a score is never guessed.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

pub const VENUES: &[&str] = &[
    "Professional",
    "Casual Party",
    "College",
    "Date Night",
    "Formal Event",
    "Gym/Athletic",
];

pub const WEATHERS: &[&str] = &["Hot/Sunny", "Cold/Winter", "Rainy", "Mild/Spring", "Humid"];

pub const PREFERENCES: &[&str] = &[
    "Minimalist",
    "Streetwear",
    "Classic Professional",
    "Vintage/Retro",
    "Avant-garde",
    "Bohemian",
];

// These patterns are static and guaranteed to compile, so expect() is safe.
static SCORE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SCORE:\s*(\d+)\s*$").expect("static regex: score line"));

static EXPLANATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^EXPLANATION:\s*(.*)$").expect("static regex: explanation line")
});

static TIP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(\S.*)$").expect("static regex: tip line"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRating {
    pub score: u8,
    pub explanation: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Venue, weather and style preference an outfit is judged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitContext {
    pub venue: String,
    pub weather: String,
    pub preference: String,
}

impl OutfitContext {
    pub fn new(
        venue: impl Into<String>,
        weather: impl Into<String>,
        preference: impl Into<String>,
    ) -> Self {
        Self {
            venue: venue.into(),
            weather: weather.into(),
            preference: preference.into(),
        }
    }
}

impl Default for OutfitContext {
    fn default() -> Self {
        Self::new("Professional", "Mild/Spring", "Minimalist")
    }
}

/// Parses a model reply written in the `SCORE:` / `EXPLANATION:` / `TIPS:` grammar.
pub fn parse_rating(reply: &str) -> Result<StyleRating> {
    let body = strip_code_fence(reply.trim());
    let mut lines = body.lines().map(str::trim_end);

    let score_line = next_non_blank(&mut lines)
        .ok_or_else(|| Error::Parse("reply is empty".to_string()))?;
    let score = parse_score_line(score_line.trim_start())?;

    let explanation_line = next_non_blank(&mut lines)
        .ok_or_else(|| Error::Parse("missing EXPLANATION: line".to_string()))?;
    let first = EXPLANATION_LINE
        .captures(explanation_line.trim_start())
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            Error::Parse(format!(
                "expected EXPLANATION: after the score, found '{}'",
                explanation_line.trim()
            ))
        })?;

    let mut explanation = vec![first.as_str()];
    let mut saw_tips = false;
    for line in lines.by_ref() {
        if let Some(rest) = line.trim().strip_prefix("TIPS:") {
            if !rest.trim().is_empty() {
                return Err(Error::Parse(format!(
                    "TIPS: must be on a line of its own, found '{}'",
                    line.trim()
                )));
            }
            saw_tips = true;
            break;
        }
        explanation.push(line);
    }

    let explanation = explanation.join("\n").trim().to_string();
    if explanation.is_empty() {
        return Err(Error::Parse("EXPLANATION is empty".to_string()));
    }

    let mut tips = Vec::new();
    if saw_tips {
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let tip = TIP_LINE
                .captures(line.trim())
                .and_then(|c| c.get(1))
                .ok_or_else(|| {
                    Error::Parse(format!("unexpected line in TIPS: '{}'", line.trim()))
                })?;
            tips.push(tip.as_str().trim().to_string());
        }
    }

    Ok(StyleRating {
        score,
        explanation,
        tips,
    })
}

fn parse_score_line(line: &str) -> Result<u8> {
    let value = SCORE_LINE
        .captures(line)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::Parse(format!("expected a SCORE: line, found '{}'", line)))?
        .as_str();

    let out_of_range = || {
        Error::Parse(format!(
            "SCORE {} is outside {}-{}",
            value, MIN_SCORE, MAX_SCORE
        ))
    };

    let score: u8 = value.parse().map_err(|_| out_of_range())?;
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(out_of_range());
    }

    Ok(score)
}

fn next_non_blank<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<&'a str> {
    lines.find(|line| !line.trim().is_empty())
}

/// Models sometimes wrap the whole answer in a Markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };
    // Drop an info string such as ```text on the opening line.
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_reply() {
        let rating = parse_rating("SCORE:8\nEXPLANATION:Great contrast.").unwrap();
        assert_eq!(
            rating,
            StyleRating {
                score: 8,
                explanation: "Great contrast.".to_string(),
                tips: vec![],
            }
        );
    }

    #[test]
    fn test_parse_multiline_explanation_and_tips() {
        let reply = "\
SCORE: 6
EXPLANATION: The blazer works for the office.
The sneakers pull it toward casual.

TIPS:
- Swap the sneakers for loafers.
* Add a leather belt.
";
        let rating = parse_rating(reply).unwrap();
        assert_eq!(rating.score, 6);
        assert_eq!(
            rating.explanation,
            "The blazer works for the office.\nThe sneakers pull it toward casual."
        );
        assert_eq!(
            rating.tips,
            vec![
                "Swap the sneakers for loafers.".to_string(),
                "Add a leather belt.".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_code_fence_and_blank_lines() {
        let reply = "```text\n\nSCORE: 10\n\nEXPLANATION: Flawless.\n```";
        let rating = parse_rating(reply).unwrap();
        assert_eq!(rating.score, 10);
        assert_eq!(rating.explanation, "Flawless.");
    }

    #[test]
    fn test_missing_score_marker_is_parse_error() {
        let err = parse_rating("I'd give this an 8/10. Great contrast.").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_score_must_come_first() {
        let err = parse_rating("EXPLANATION: nice\nSCORE: 7").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_non_integer_score_is_parse_error() {
        for reply in [
            "SCORE: 7.5\nEXPLANATION: ok",
            "SCORE: seven\nEXPLANATION: ok",
            "SCORE: 8/10\nEXPLANATION: ok",
            "SCORE:\nEXPLANATION: ok",
            "SCORE: +8\nEXPLANATION: ok",
            "SCORE: -3\nEXPLANATION: ok",
        ] {
            let err = parse_rating(reply).unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "accepted {:?}", reply);
        }
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        for reply in [
            "SCORE: 0\nEXPLANATION: ok",
            "SCORE: 11\nEXPLANATION: ok",
            "SCORE: 300\nEXPLANATION: ok",
        ] {
            let err = parse_rating(reply).unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "accepted {:?}", reply);
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let err = parse_rating("score: 8\nexplanation: ok").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_or_empty_explanation_is_parse_error() {
        assert!(matches!(
            parse_rating("SCORE: 8").unwrap_err(),
            Error::Parse(_)
        ));
        assert!(matches!(
            parse_rating("SCORE: 8\nEXPLANATION:   \nTIPS:\n- a").unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn test_garbage_after_tips_is_parse_error() {
        let err = parse_rating("SCORE: 8\nEXPLANATION: ok\nTIPS:\nwear a hat").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_tips_label_with_inline_content_is_parse_error() {
        let err = parse_rating("SCORE: 8\nEXPLANATION: ok\nTIPS: wear a hat").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let rating = parse_rating("SCORE: 8\nEXPLANATION: ok\n  TIPS:  \n- wear a hat").unwrap();
        assert_eq!(rating.explanation, "ok");
        assert_eq!(rating.tips, vec!["wear a hat".to_string()]);
    }

    #[test]
    fn test_default_context_uses_first_presets() {
        let context = OutfitContext::default();
        assert!(VENUES.contains(&context.venue.as_str()));
        assert!(WEATHERS.contains(&context.weather.as_str()));
        assert!(PREFERENCES.contains(&context.preference.as_str()));
    }
}
