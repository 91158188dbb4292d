use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;

pub const CONFIG_PATH_ENV: &str = "FEEDBACK_REPORTER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "feedback-reporter.toml";
const ENV_PREFIX: &str = "FEEDBACK_REPORTER_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisConfig {
    /// Sample comments per sentiment label in the prompt
    #[validate(range(min = 1, max = 50))]
    pub sample_limit: usize,

    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,

    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_limit: 3,
            max_upload_bytes: 10 * 1024 * 1024,
            delimiter: ',',
        }
    }
}

impl AnalysisConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

fn validate_delimiter(delimiter: &char) -> std::result::Result<(), ValidationError> {
    if delimiter.is_ascii() && !delimiter.is_ascii_alphanumeric() && *delimiter != '"' {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter must be a single ASCII punctuation or whitespace character"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub llm: LLMConfig,
    #[validate(nested)]
    pub analysis: AnalysisConfig,
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then the TOML file, then `FEEDBACK_REPORTER_*`, then the
    /// conventional `OPENAI_*` variables.
    pub fn new() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::with_file(path)
    }

    pub fn with_file(path: PathBuf) -> Self {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY", "OPENAI_MODEL", "OPENAI_BASE_URL"])
                    .map(|key| {
                        let key = key.as_str();
                        if key.eq_ignore_ascii_case("OPENAI_API_KEY") {
                            "llm.api_key".into()
                        } else if key.eq_ignore_ascii_case("OPENAI_MODEL") {
                            "llm.model".into()
                        } else {
                            "llm.base_url".into()
                        }
                    }),
            );
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let mut config: AppConfig = self.figment.extract()?;
        config.llm = config.llm.with_provider_defaults();
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
