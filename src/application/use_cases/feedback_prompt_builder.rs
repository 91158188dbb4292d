//! Prompt construction for feedback summarisation
//!
//! Renders sentiment statistics and sample comments into a single user prompt
//! that asks the model for a JSON object with exactly two suggestions.

use crate::domain::feedback::{SampleSet, SentimentLabel, SentimentStats};

pub const SYSTEM_PROMPT: &str = "You are an assistant that distills customer feedback into concise product insights and actionable improvements.";

const OUTPUT_CONTRACT: &str = "Summarize the key customer sentiment themes and recommend exactly two product improvement actions. Respond as JSON with the following keys:\n{\"summary\": \"<string>\", \"improvement_suggestions\": [\"<string>\", \"<string>\"]}";

/// Build the user prompt. Pure and deterministic for equal inputs.
pub fn build_prompt(stats: &SentimentStats, samples: &SampleSet) -> String {
    let distribution = SentimentLabel::ALL
        .iter()
        .map(|label| format!("{}% {}", format_percent(stats.get(*label).percent), label))
        .collect::<Vec<_>>()
        .join(", ");

    let sample_blocks = SentimentLabel::ALL
        .iter()
        .map(|label| sample_block(*label, samples.get(*label)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Sentiment distribution: {}.\n\nSample customer comments:\n{}\n\n{}",
        distribution, sample_blocks, OUTPUT_CONTRACT
    )
}

fn sample_block(label: SentimentLabel, comments: &[String]) -> String {
    if comments.is_empty() {
        return format!("{} samples:\n- None provided", label.title());
    }
    format!("{} samples:\n- {}", label.title(), comments.join("\n- "))
}

/// Shortest round-tripping form, always with a fractional digit (`50.0`, `33.33`).
fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
