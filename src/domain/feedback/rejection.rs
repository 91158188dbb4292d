// ============================================================
// FEEDBACK REJECTION
// ============================================================
// Reasons an uploaded feedback CSV is refused

use serde::{Deserialize, Serialize};

/// Why a feedback CSV failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FeedbackRejection {
    /// Bytes are not delimited tabular data with a header row
    Unparseable,

    /// Required columns absent, in declared order
    MissingColumns { columns: Vec<String> },

    /// At least one rating is empty or not a number
    NonNumericRating,

    /// At least one text cell is empty after trimming
    EmptyText,
}

impl FeedbackRejection {
    pub fn code(&self) -> &'static str {
        match self {
            FeedbackRejection::Unparseable => "unparseable_csv",
            FeedbackRejection::MissingColumns { .. } => "missing_columns",
            FeedbackRejection::NonNumericRating => "non_numeric_rating",
            FeedbackRejection::EmptyText => "empty_text",
        }
    }
}

impl std::fmt::Display for FeedbackRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackRejection::Unparseable => {
                write!(f, "Unable to parse CSV file. Ensure it is a valid CSV.")
            }
            FeedbackRejection::MissingColumns { columns } => {
                write!(f, "Missing required columns: {}.", columns.join(", "))
            }
            FeedbackRejection::NonNumericRating => {
                write!(f, "Column 'rating' contains non-numeric values.")
            }
            FeedbackRejection::EmptyText => write!(f, "Column 'text' contains empty entries."),
        }
    }
}

impl std::error::Error for FeedbackRejection {}
