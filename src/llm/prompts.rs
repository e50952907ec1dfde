use crate::config::DEFAULT_EXCERPT_CHARS;
use crate::models::DocumentText;

pub const SYSTEM_PROMPT: &str = "You're an HR professional.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub resume_excerpt: String,
    pub job_excerpt: String,
}

impl FeedbackRequest {
    /// Both documents are cut to `max_chars` characters to keep the prompt small.
    pub fn new(resume: &DocumentText, job: &DocumentText, max_chars: usize) -> Self {
        Self {
            resume_excerpt: resume.excerpt(max_chars).to_string(),
            job_excerpt: job.excerpt(max_chars).to_string(),
        }
    }

    pub fn with_default_excerpt(resume: &DocumentText, job: &DocumentText) -> Self {
        Self::new(resume, job, DEFAULT_EXCERPT_CHARS)
    }

    pub fn to_prompt(&self) -> String {
        format!(
            "Rate this resume:\n{}\n\nFor this job:\n{}",
            self.resume_excerpt, self.job_excerpt
        )
    }

    pub fn estimate_tokens(&self) -> usize {
        // Rough estimate: ~4 characters per token
        (self.resume_excerpt.len() + self.job_excerpt.len()) / 4
    }
}
