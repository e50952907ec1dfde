//! Fixed keyword checklists. All entries are lowercase; matching code
//! lower-cases the document instead.

pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "django",
    "flask",
    "sql",
    "api",
    "html",
    "javascript",
    "postgresql",
    "machine learning",
    "data analysis",
];

pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "worked at",
    "project",
    "internship",
    "responsible for",
];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "b.sc",
    "m.sc",
    "degree",
    "university",
    "college",
];

/// Skills shown in the "found / missing" highlights and checked for
/// job keyword gaps.
pub const HIGHLIGHT_SKILLS: &[&str] = &[
    "python",
    "django",
    "flask",
    "sql",
    "api",
    "html",
    "javascript",
    "postgresql",
];

pub const RESUME_SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "excel",
    "pandas",
    "numpy",
    "tensorflow",
    "machine learning",
    "data analysis",
];

pub const JOB_SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "c++",
    "html",
    "css",
    "javascript",
    "sql",
    "machine learning",
    "data science",
    "excel",
    "communication",
    "teamwork",
    "leadership",
    "problem solving",
    "deep learning",
];

pub const EDUCATION_LINE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "b.tech",
    "m.tech",
    "phd",
    "b.sc",
    "m.sc",
    "graduation",
    "engineering",
];

/// The three checklists the scorer grades a resume against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringKeywords {
    pub skills: &'static [&'static str],
    pub experience: &'static [&'static str],
    pub education: &'static [&'static str],
}

impl Default for ScoringKeywords {
    fn default() -> Self {
        Self {
            skills: SKILL_KEYWORDS,
            experience: EXPERIENCE_KEYWORDS,
            education: EDUCATION_KEYWORDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lists_are_lowercase_and_non_empty() {
        let lists = [
            SKILL_KEYWORDS,
            EXPERIENCE_KEYWORDS,
            EDUCATION_KEYWORDS,
            HIGHLIGHT_SKILLS,
            RESUME_SKILL_KEYWORDS,
            JOB_SKILL_KEYWORDS,
            EDUCATION_LINE_KEYWORDS,
        ];

        for list in lists {
            assert!(!list.is_empty());
            for keyword in list {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_default_scoring_keywords() {
        let keywords = ScoringKeywords::default();
        assert_eq!(keywords.skills.len(), 10);
        assert_eq!(keywords.experience.len(), 5);
        assert_eq!(keywords.education.len(), 7);
    }
}
