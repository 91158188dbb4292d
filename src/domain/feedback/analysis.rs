// ============================================================
// ANALYSIS TYPES
// ============================================================
// Statistics, samples, and the final per-request result

use serde::{Deserialize, Serialize};

use super::SentimentLabel;

/// Count and share of one sentiment bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDetail {
    pub count: usize,

    /// 0..=100, rounded to two decimals
    pub percent: f64,
}

/// Per-label breakdown; every label is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub positive: SentimentDetail,
    pub neutral: SentimentDetail,
    pub negative: SentimentDetail,
}

impl SentimentStats {
    pub fn get(&self, label: SentimentLabel) -> &SentimentDetail {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Neutral => &self.neutral,
            SentimentLabel::Negative => &self.negative,
        }
    }

    pub fn get_mut(&mut self, label: SentimentLabel) -> &mut SentimentDetail {
        match label {
            SentimentLabel::Positive => &mut self.positive,
            SentimentLabel::Neutral => &mut self.neutral,
            SentimentLabel::Negative => &mut self.negative,
        }
    }

    pub fn total(&self) -> usize {
        SentimentLabel::ALL
            .iter()
            .map(|label| self.get(*label).count)
            .sum()
    }
}

/// Representative comments per label, table order preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    pub positive: Vec<String>,
    pub neutral: Vec<String>,
    pub negative: Vec<String>,
}

impl SampleSet {
    pub fn get(&self, label: SentimentLabel) -> &[String] {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Neutral => &self.neutral,
            SentimentLabel::Negative => &self.negative,
        }
    }

    pub fn get_mut(&mut self, label: SentimentLabel) -> &mut Vec<String> {
        match label {
            SentimentLabel::Positive => &mut self.positive,
            SentimentLabel::Neutral => &mut self.neutral,
            SentimentLabel::Negative => &mut self.negative,
        }
    }
}

/// Response body for a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub improvement_suggestions: [String; 2],
    pub sentiment_stats: SentimentStats,
}
