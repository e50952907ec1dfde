use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_EXCERPT_CHARS: usize = 1500;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub database_path: String,
    pub excerpt_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let openai_model = env::var("OPENAI_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "resume_analysis.db".to_string());

        let excerpt_chars = match env::var("LLM_EXCERPT_CHARS") {
            Ok(value) => value.parse().map_err(|_| {
                Error::Config(format!("LLM_EXCERPT_CHARS must be a positive integer, got '{}'", value))
            })?,
            Err(_) => DEFAULT_EXCERPT_CHARS,
        };

        if excerpt_chars == 0 {
            return Err(Error::Config("LLM_EXCERPT_CHARS must be greater than zero".to_string()));
        }

        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_model,
            database_path,
            excerpt_chars,
        })
    }

    /// The API key, or a configuration error when AI feedback was asked for
    /// without one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("OPENAI_API_KEY environment variable not set".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub excerpt_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            excerpt_chars: config.excerpt_chars,
        }
    }
}
