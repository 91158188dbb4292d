pub mod feedback_analysis;
pub mod feedback_prompt_builder;
pub mod response_parser;
pub mod sample_selector;
pub mod sentiment_stats;
