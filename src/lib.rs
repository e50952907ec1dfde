pub mod config;
pub mod error;
pub mod keywords;
pub mod models;
pub mod input;
pub mod llm;
pub mod analysis;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use llm::{FeedbackProvider, OpenAIProvider};
pub use analysis::{score, AnalysisPipeline, Scorer};
pub use models::ScoreBreakdown;
pub use storage::Storage;
