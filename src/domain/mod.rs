pub mod error;
pub mod feedback;
pub mod llm_config;
