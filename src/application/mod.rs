pub mod use_cases;

pub use use_cases::feedback_analysis::FeedbackAnalysisUseCase;
