use crate::keywords::ScoringKeywords;
use crate::models::ScoreBreakdown;

/// Grades a resume against fixed keyword checklists.
///
/// Only the resume is inspected: each category score is the share of its
/// checklist found in the resume text, so the result measures resume
/// completeness rather than overlap with a particular job posting.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    keywords: ScoringKeywords,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(keywords: ScoringKeywords) -> Self {
        Self { keywords }
    }

    // The job text is part of the contract but does not feed the category
    // scores; job-specific gaps come from the suggestion and keyword-gap helpers.
    pub fn score(&self, resume_text: &str, _job_text: &str) -> ScoreBreakdown {
        let resume = resume_text.to_lowercase();

        ScoreBreakdown::from_categories(
            category_score(&resume, self.keywords.skills),
            category_score(&resume, self.keywords.experience),
            category_score(&resume, self.keywords.education),
        )
    }
}

/// Scores `resume_text` against `job_text` with the default checklists.
pub fn score(resume_text: &str, job_text: &str) -> ScoreBreakdown {
    Scorer::new().score(resume_text, job_text)
}

/// Percentage of `keywords` found in the already lower-cased text, truncated.
/// An empty checklist scores 0.
pub fn category_score(lowered_text: &str, keywords: &[&str]) -> u8 {
    if keywords.is_empty() {
        return 0;
    }

    let matched = keywords
        .iter()
        .filter(|keyword| lowered_text.contains(*keyword))
        .count();

    (matched * 100 / keywords.len()) as u8
}
