// ============================================================
// FEEDBACK ROW TYPES
// ============================================================
// Validated, labeled customer feedback records

use serde::{Deserialize, Serialize};

use super::SentimentLabel;

/// Columns every feedback CSV must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 3] = ["feedback_id", "text", "rating"];

/// A single validated feedback record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRow {
    /// Caller-supplied identifier, kept verbatim
    pub feedback_id: String,

    /// Trimmed, never empty
    pub text: String,

    /// Never NaN
    pub rating: f64,

    /// Derived from `rating`
    pub sentiment: SentimentLabel,
}

impl FeedbackRow {
    pub fn new(feedback_id: String, text: String, rating: f64) -> Self {
        Self {
            feedback_id,
            text,
            rating,
            sentiment: SentimentLabel::classify(rating),
        }
    }
}

/// Ordered rows sharing the uploaded header schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackTable {
    /// Original headers, including any extra columns
    pub headers: Vec<String>,

    pub rows: Vec<FeedbackRow>,
}

impl FeedbackTable {
    pub fn new(headers: Vec<String>, rows: Vec<FeedbackRow>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying `label`, in table order
    pub fn rows_with(&self, label: SentimentLabel) -> impl Iterator<Item = &FeedbackRow> {
        self.rows.iter().filter(move |row| row.sentiment == label)
    }
}
