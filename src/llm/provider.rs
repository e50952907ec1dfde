use async_trait::async_trait;
use crate::error::Result;
use crate::llm::prompts::FeedbackRequest;

#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Free-text commentary on how well the resume excerpt fits the job.
    async fn feedback(&self, request: FeedbackRequest) -> Result<String>;
    fn name(&self) -> &str;
}
