//! Tolerant decoding of the model's reply
//!
//! The prompt asks for a JSON object, but models do not always comply. Decoding
//! is attempted in two stages: first as the structured JSON shape, then as a
//! line-oriented fallback. Neither stage fails; an unusable reply simply yields
//! too few suggestions and the caller decides what that means.

use serde::Deserialize;
use serde_json::Value;

use crate::infrastructure::response::clean_llm_response;

/// Characters stripped from the start of fallback lines
const BULLET_CHARS: [char; 2] = ['-', '•'];

/// Line boundaries, including lone `\r` and the Unicode separators
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Outcome of decoding a model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// The reply matched the requested JSON shape
    Structured {
        summary: String,
        suggestions: Vec<String>,
    },

    /// Cleaned, non-empty lines of a reply that did not
    Fallback { lines: Vec<String> },
}

impl ParsedResponse {
    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedResponse::Structured { .. })
    }

    /// Resolve to `(summary, suggestions)`.
    ///
    /// For the fallback the first line is the summary and the next two at most
    /// are suggestions.
    pub fn into_parts(self) -> (String, Vec<String>) {
        match self {
            ParsedResponse::Structured {
                summary,
                suggestions,
            } => (summary, suggestions),
            ParsedResponse::Fallback { lines } => {
                let mut lines = lines.into_iter();
                let summary = lines.next().unwrap_or_default();
                (summary, lines.take(2).collect())
            }
        }
    }
}

#[derive(Deserialize)]
struct StructuredReply {
    #[serde(default)]
    summary: Value,

    // `null` or a non-array fails deserialization and routes to the fallback.
    #[serde(default)]
    improvement_suggestions: Vec<Value>,
}

pub fn parse_response(content: &str) -> ParsedResponse {
    let cleaned = clean_llm_response(content);

    match decode_structured(&cleaned) {
        Some(reply) => ParsedResponse::Structured {
            summary: value_text(&reply.summary).trim().to_string(),
            suggestions: reply
                .improvement_suggestions
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| value_text(item).trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        },
        None => ParsedResponse::Fallback {
            lines: fallback_lines(&cleaned),
        },
    }
}

/// Only a JSON object is accepted; serde would otherwise read a bare array positionally.
fn decode_structured(content: &str) -> Option<StructuredReply> {
    let value: Value = serde_json::from_str(content).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn fallback_lines(content: &str) -> Vec<String> {
    content
        .split(LINE_BREAKS)
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_whitespace() || BULLET_CHARS.contains(&c))
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}
