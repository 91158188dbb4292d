use crate::application::use_cases::feedback_prompt_builder::{build_prompt, SYSTEM_PROMPT};
use crate::application::use_cases::response_parser::parse_response;
use crate::application::use_cases::sample_selector::{select_samples, DEFAULT_SAMPLE_LIMIT};
use crate::application::use_cases::sentiment_stats::aggregate;
use crate::domain::error::{AppError, Result};
use crate::domain::feedback::AnalysisResult;
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::csv::FeedbackCsvReader;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const MISSING_SUGGESTIONS_MESSAGE: &str =
    "Language model did not return the expected suggestions.";

/// Runs one upload through validation, statistics, prompting, and reply parsing.
///
/// Holds no per-request state, so a single instance serves concurrent requests.
pub struct FeedbackAnalysisUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
    reader: FeedbackCsvReader,
    sample_limit: usize,
}

impl FeedbackAnalysisUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self {
            llm_client,
            config,
            reader: FeedbackCsvReader::new(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.reader = self.reader.with_delimiter(delimiter);
        self
    }

    pub async fn execute(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        let table = self.reader.validate(bytes).map_err(|rejection| {
            warn!(reason = rejection.code(), "Rejected feedback CSV: {}", rejection);
            AppError::from(rejection)
        })?;

        let stats = aggregate(&table);
        let samples = select_samples(&table, self.sample_limit);
        let prompt = build_prompt(&stats, &samples);

        info!(
            rows = table.len(),
            positive = stats.positive.count,
            neutral = stats.neutral.count,
            negative = stats.negative.count,
            provider = ?self.config.provider,
            model = %self.config.model,
            "Requesting feedback summary"
        );

        let reply = self
            .llm_client
            .generate(&self.config, SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|err| {
                error!(error = %err, "Language model request failed");
                match err {
                    AppError::LLMError(_) => err,
                    other => AppError::LLMError(other.to_string()),
                }
            })?;

        let parsed = parse_response(&reply);
        let structured = parsed.is_structured();
        let (summary, suggestions) = parsed.into_parts();

        info!(
            reply_len = reply.len(),
            structured,
            suggestions = suggestions.len(),
            "Parsed language model reply"
        );

        let improvement_suggestions = exactly_two(suggestions)?;

        Ok(AnalysisResult {
            summary,
            improvement_suggestions,
            sentiment_stats: stats,
        })
    }
}

/// Keep the first two suggestions; fewer than two fails the whole request.
fn exactly_two(mut suggestions: Vec<String>) -> Result<[String; 2]> {
    if suggestions.len() < 2 {
        warn!(
            suggestions = suggestions.len(),
            "Language model reply had too few suggestions"
        );
        return Err(AppError::IncompleteResponse(
            MISSING_SUGGESTIONS_MESSAGE.to_string(),
        ));
    }
    suggestions.truncate(2);
    <[String; 2]>::try_from(suggestions)
        .map_err(|_| AppError::Internal("suggestion list length changed".to_string()))
}
