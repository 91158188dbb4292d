// ============================================================
// FEEDBACK DOMAIN LAYER
// ============================================================
// Core types for customer feedback sentiment analysis
// No I/O, no async

mod analysis;
mod feedback_row;
mod rejection;
mod sentiment;

pub use analysis::{AnalysisResult, SampleSet, SentimentDetail, SentimentStats};
pub use feedback_row::{FeedbackRow, FeedbackTable, REQUIRED_COLUMNS};
pub use rejection::FeedbackRejection;
pub use sentiment::SentimentLabel;
