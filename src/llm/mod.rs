pub mod provider;
pub mod openai;
pub mod prompts;

pub use provider::FeedbackProvider;
pub use openai::OpenAIProvider;
pub use prompts::{FeedbackRequest, SYSTEM_PROMPT};
