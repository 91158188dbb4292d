use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::feedback::FeedbackRejection;

/// Who is at fault for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    Client,
    Upstream,
    Internal,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    InvalidFeedback(FeedbackRejection),
    PayloadTooLarge(String),
    LLMError(String),
    IncompleteResponse(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidFeedback(_)
            | AppError::PayloadTooLarge(_) => ErrorClass::Client,
            AppError::LLMError(_) | AppError::IncompleteResponse(_) => ErrorClass::Upstream,
            AppError::Internal(_) | AppError::ConfigError(_) | AppError::IoError(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// Stable, machine-checkable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "internal_error",
            AppError::ValidationError(_) => "invalid_upload",
            AppError::InvalidFeedback(rejection) => rejection.code(),
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::LLMError(_) => "llm_unavailable",
            AppError::IncompleteResponse(_) => "llm_incomplete_response",
            AppError::ConfigError(_) => "config_error",
            AppError::IoError(_) => "io_error",
        }
    }

    /// Message safe to hand back to the requester.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::IncompleteResponse(msg) => msg.clone(),
            AppError::InvalidFeedback(rejection) => rejection.to_string(),
            AppError::LLMError(_) => "Failed to generate summary from language model.".to_string(),
            AppError::Internal(_) | AppError::ConfigError(_) | AppError::IoError(_) => {
                "Internal server error.".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::InvalidFeedback(rejection) => write!(f, "Invalid feedback CSV: {}", rejection),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::IncompleteResponse(msg) => write!(f, "Incomplete LLM response: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<FeedbackRejection> for AppError {
    fn from(rejection: FeedbackRejection) -> Self {
        AppError::InvalidFeedback(rejection)
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
