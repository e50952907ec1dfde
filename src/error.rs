use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported file type: {0}. Please provide a PDF or DOCX resume.")]
    UnsupportedFormat(String),

    #[error("Failed to read document {path}: {reason}")]
    ParseFailure { path: String, reason: String },

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse_failure(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::ParseFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors that only affect a single resume or the optional feedback
    /// section; the rest of a batch carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_)
                | Error::ParseFailure { .. }
                | Error::LLMApi(_)
                | Error::Network(_)
        )
    }
}
