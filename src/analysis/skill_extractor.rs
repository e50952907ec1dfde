use std::collections::BTreeSet;

use crate::analysis::suggestions::tokenize;
use crate::keywords::{HIGHLIGHT_SKILLS, JOB_SKILL_KEYWORDS, RESUME_SKILL_KEYWORDS};
use crate::models::SkillHighlights;

/// Keyword lookups over resume and job text. The keyword list is always a
/// parameter so the same matching serves resume skills, job skills and the
/// display highlights.
pub struct SkillExtractor {
    resume_keywords: &'static [&'static str],
    job_keywords: &'static [&'static str],
    highlight_keywords: &'static [&'static str],
}

impl SkillExtractor {
    pub fn new() -> Self {
        Self {
            resume_keywords: RESUME_SKILL_KEYWORDS,
            job_keywords: JOB_SKILL_KEYWORDS,
            highlight_keywords: HIGHLIGHT_SKILLS,
        }
    }

    pub fn resume_skills(&self, resume_text: &str) -> BTreeSet<String> {
        extract_skills(resume_text, self.resume_keywords)
    }

    pub fn job_skills(&self, text: &str) -> BTreeSet<String> {
        extract_skills(text, self.job_keywords)
    }

    pub fn highlights(&self, resume_text: &str) -> SkillHighlights {
        skill_highlights(resume_text, self.highlight_keywords)
    }

    pub fn missing_keywords(&self, resume_text: &str, job_text: &str) -> Vec<String> {
        missing_job_keywords(resume_text, job_text, self.highlight_keywords)
    }

    /// Percent of the job's skills that also show up in the resume, both
    /// read with the job skill list.
    pub fn job_overlap(&self, resume_text: &str, job_text: &str) -> f64 {
        skill_overlap(&self.job_skills(resume_text), &self.job_skills(job_text))
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Keywords occurring anywhere in the lower-cased text.
pub fn extract_skills(text: &str, keywords: &[&str]) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

pub fn skill_highlights(text: &str, keywords: &[&str]) -> SkillHighlights {
    let lowered = text.to_lowercase();
    let (found, missing): (Vec<&str>, Vec<&str>) = keywords
        .iter()
        .partition(|keyword| lowered.contains(*keyword));

    SkillHighlights {
        found: found.into_iter().map(String::from).collect(),
        missing: missing.into_iter().map(String::from).collect(),
    }
}

/// Keywords that appear as a word of the job posting but not of the resume,
/// in keyword order.
pub fn missing_job_keywords(resume_text: &str, job_text: &str, keywords: &[&str]) -> Vec<String> {
    let job_words = tokenize(job_text);
    let resume_words = tokenize(resume_text);

    keywords
        .iter()
        .filter(|keyword| job_words.contains(**keyword) && !resume_words.contains(**keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

pub fn skill_overlap(resume_skills: &BTreeSet<String>, job_skills: &BTreeSet<String>) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }

    let matched = resume_skills.intersection(job_skills).count();
    let percent = matched as f64 / job_skills.len() as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skills_empty_when_nothing_matches() {
        assert!(extract_skills("Pastry chef and sommelier", HIGHLIGHT_SKILLS).is_empty());
        assert!(extract_skills("", JOB_SKILL_KEYWORDS).is_empty());
    }

    #[test]
    fn test_extract_skills_full_set_on_concatenation() {
        for keywords in [RESUME_SKILL_KEYWORDS, JOB_SKILL_KEYWORDS, HIGHLIGHT_SKILLS] {
            let text = keywords.concat();
            let found = extract_skills(&text, keywords);
            let expected: BTreeSet<String> = keywords.iter().map(|k| k.to_string()).collect();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn test_extract_skills_is_case_insensitive() {
        let found = extract_skills("Built ML pipelines in PYTHON and Excel", RESUME_SKILL_KEYWORDS);
        let expected: BTreeSet<String> =
            ["python", "excel"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_highlights_keep_keyword_order() {
        let highlights = skill_highlights("SQL, Python and a REST API", HIGHLIGHT_SKILLS);
        assert_eq!(highlights.found, vec!["python", "sql", "api"]);
        assert_eq!(
            highlights.missing,
            vec!["django", "flask", "html", "javascript", "postgresql"]
        );
    }

    #[test]
    fn test_missing_job_keywords() {
        let missing = missing_job_keywords(
            "Python developer",
            "We use python, django and postgresql.",
            HIGHLIGHT_SKILLS,
        );
        assert_eq!(missing, vec!["django", "postgresql"]);

        assert!(missing_job_keywords("", "", HIGHLIGHT_SKILLS).is_empty());
    }

    #[test]
    fn test_skill_overlap() {
        let extractor = SkillExtractor::new();
        let overlap = extractor.job_overlap(
            "Python and SQL",
            "Python, SQL and Java with strong communication",
        );
        assert_eq!(overlap, 50.0);

        let thirds = skill_overlap(
            &["python".to_string()].into_iter().collect(),
            &["python", "sql", "excel"].iter().map(|s| s.to_string()).collect(),
        );
        assert_eq!(thirds, 33.33);

        assert_eq!(skill_overlap(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }
}
