use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LLMProvider {
    #[serde(alias = "openai")]
    OpenAI,
    #[serde(alias = "google", alias = "gemini")]
    Google,
}

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

impl LLMProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => OPENAI_BASE_URL,
            LLMProvider::Google => GEMINI_BASE_URL,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    pub api_key: Option<String>,
    #[validate(range(min = 1))]
    pub max_tokens: Option<u32>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            base_url: OPENAI_BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.3),
        }
    }
}

impl LLMConfig {
    /// Swap in the provider's endpoint when `base_url` is still another provider's default.
    pub fn with_provider_defaults(mut self) -> Self {
        let own = self.provider.default_base_url();
        let current = self.base_url.trim_end_matches('/');
        let is_foreign_default = [OPENAI_BASE_URL, GEMINI_BASE_URL]
            .iter()
            .any(|url| *url != own && *url == current);
        if is_foreign_default {
            self.base_url = self.provider.default_base_url().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_gets_gemini_endpoint() {
        let config = LLMConfig {
            provider: LLMProvider::Google,
            ..LLMConfig::default()
        }
        .with_provider_defaults();

        assert_eq!(config.base_url, GEMINI_BASE_URL);
    }

    #[test]
    fn test_custom_base_url_kept() {
        let config = LLMConfig {
            provider: LLMProvider::Google,
            base_url: "https://gemini.internal.example/v1beta/models".to_string(),
            ..LLMConfig::default()
        }
        .with_provider_defaults();

        assert_eq!(config.base_url, "https://gemini.internal.example/v1beta/models");
    }

    #[test]
    fn test_openai_default_untouched() {
        let config = LLMConfig::default().with_provider_defaults();
        assert_eq!(config.base_url, OPENAI_BASE_URL);
    }
}
