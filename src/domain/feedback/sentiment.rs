// ============================================================
// SENTIMENT LABEL
// ============================================================
// Derived bucket for a numeric customer rating

use serde::{Deserialize, Serialize};

/// Sentiment bucket derived from a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Fixed reporting order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Label a rating: `>= 4` positive, `== 3` neutral, anything else negative.
    ///
    /// Total over every `f64`, so out-of-range and fractional ratings
    /// (`-1`, `3.5`) land in `Negative` rather than being rejected.
    pub fn classify(rating: f64) -> Self {
        if rating >= 4.0 {
            SentimentLabel::Positive
        } else if rating == 3.0 {
            SentimentLabel::Neutral
        } else {
            SentimentLabel::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Capitalized form used in prompt headings
    pub fn title(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(SentimentLabel::classify(5.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(4.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify(3.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify(2.9), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(1.0), SentimentLabel::Negative);
    }

    #[test]
    fn test_classify_out_of_range() {
        assert_eq!(SentimentLabel::classify(-1.0), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(3.5), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify(42.0), SentimentLabel::Positive);
        assert_eq!(
            SentimentLabel::classify(f64::NEG_INFINITY),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
        assert_eq!(SentimentLabel::Negative.title(), "Negative");
    }
}
