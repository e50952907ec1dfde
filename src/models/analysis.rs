use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::{MatchLevel, ScoreBreakdown};

/// One persisted scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub resume_name: String,
    pub job_name: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn score_percent(&self) -> u8 {
        (self.score * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillHighlights {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    pub resume_name: String,
    pub job_name: String,
    pub breakdown: ScoreBreakdown,
    pub match_level: MatchLevel,
    pub suggestions: Vec<String>,
    /// Highlight skills the job asks for that the resume never mentions.
    pub missing_keywords: Vec<String>,
    pub highlights: SkillHighlights,
    pub resume_skills: Vec<String>,
    /// Share of the job's skills also present in the resume, in percent.
    pub job_skill_overlap: f64,
    pub education: Vec<String>,
    pub experience: String,
    pub ai_feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Analyzed(ResumeReport),
    Failed { resume_name: String, error: String },
}

impl BatchEntry {
    pub fn resume_name(&self) -> &str {
        match self {
            BatchEntry::Analyzed(report) => &report.resume_name,
            BatchEntry::Failed { resume_name, .. } => resume_name,
        }
    }

    pub fn report(&self) -> Option<&ResumeReport> {
        match self {
            BatchEntry::Analyzed(report) => Some(report),
            BatchEntry::Failed { .. } => None,
        }
    }
}
