use serde::{Deserialize, Serialize};

/// Category scores and their truncated average. Only constructible through
/// [`ScoreBreakdown::from_categories`], so `final_score` always matches the
/// categories; deserializing recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryScores")]
pub struct ScoreBreakdown {
    skill_score: u8,
    experience_score: u8,
    education_score: u8,
    final_score: u8,
}

#[derive(Deserialize)]
struct CategoryScores {
    skill_score: u8,
    experience_score: u8,
    education_score: u8,
}

impl From<CategoryScores> for ScoreBreakdown {
    fn from(parts: CategoryScores) -> Self {
        Self::from_categories(parts.skill_score, parts.experience_score, parts.education_score)
    }
}

impl ScoreBreakdown {
    /// Builds a breakdown from the three category scores, each capped at 100;
    /// the final score is their truncated average.
    pub fn from_categories(skill_score: u8, experience_score: u8, education_score: u8) -> Self {
        let skill_score = skill_score.min(100);
        let experience_score = experience_score.min(100);
        let education_score = education_score.min(100);
        let total = skill_score as u32 + experience_score as u32 + education_score as u32;
        Self {
            skill_score,
            experience_score,
            education_score,
            final_score: (total / 3) as u8,
        }
    }

    pub fn skill_score(&self) -> u8 {
        self.skill_score
    }

    pub fn experience_score(&self) -> u8 {
        self.experience_score
    }

    pub fn education_score(&self) -> u8 {
        self.education_score
    }

    pub fn final_score(&self) -> u8 {
        self.final_score
    }

    pub fn zero() -> Self {
        Self::from_categories(0, 0, 0)
    }

    /// Final score in [0, 1], the form persisted to history.
    pub fn normalized(&self) -> f64 {
        self.final_score as f64 / 100.0
    }

    pub fn match_level(&self) -> MatchLevel {
        MatchLevel::from_normalized(self.normalized())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLevel {
    Great,
    Moderate,
    Low,
}

impl MatchLevel {
    pub fn from_normalized(score: f64) -> Self {
        if score > 0.7 {
            MatchLevel::Great
        } else if score > 0.4 {
            MatchLevel::Moderate
        } else {
            MatchLevel::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MatchLevel::Great => "Great match!",
            MatchLevel::Moderate => "Moderate match.",
            MatchLevel::Low => "Low match.",
        }
    }
}

impl std::fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchLevel::Great => write!(f, "Great"),
            MatchLevel::Moderate => write!(f, "Moderate"),
            MatchLevel::Low => write!(f, "Low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_score_truncates() {
        let breakdown = ScoreBreakdown::from_categories(20, 40, 14);
        assert_eq!(breakdown.final_score(), 24);

        let breakdown = ScoreBreakdown::from_categories(100, 100, 100);
        assert_eq!(breakdown.final_score(), 100);

        let breakdown = ScoreBreakdown::from_categories(0, 0, 2);
        assert_eq!(breakdown.final_score(), 0);
    }

    #[test]
    fn test_categories_are_capped() {
        let breakdown = ScoreBreakdown::from_categories(250, 100, 100);
        assert_eq!(breakdown.skill_score(), 100);
        assert_eq!(breakdown.final_score(), 100);
    }

    #[test]
    fn test_deserialize_recomputes_final_score() {
        let breakdown: ScoreBreakdown = serde_json::from_str(
            r#"{"skill_score": 20, "experience_score": 40, "education_score": 14, "final_score": 99}"#,
        )
        .unwrap();
        assert_eq!(breakdown, ScoreBreakdown::from_categories(20, 40, 14));
        assert_eq!(breakdown.final_score(), 24);

        let json = serde_json::to_value(breakdown).unwrap();
        assert_eq!(json["final_score"], 24);
    }

    #[test]
    fn test_match_level_thresholds() {
        assert_eq!(MatchLevel::from_normalized(0.71), MatchLevel::Great);
        assert_eq!(MatchLevel::from_normalized(0.70), MatchLevel::Moderate);
        assert_eq!(MatchLevel::from_normalized(0.41), MatchLevel::Moderate);
        assert_eq!(MatchLevel::from_normalized(0.40), MatchLevel::Low);
        assert_eq!(ScoreBreakdown::zero().match_level(), MatchLevel::Low);
    }
}
