use std::collections::HashSet;

pub const FALLBACK_SUGGESTION: &str = "Great job! Your resume already aligns well.";

/// A suggestion fires when any of its triggers begins a job word and begins
/// no resume word.
struct SuggestionRule {
    triggers: &'static [&'static str],
    suggestion: &'static str,
}

const RULES: &[SuggestionRule] = &[
    SuggestionRule {
        triggers: &["python"],
        suggestion: "Mention Python if you have experience with it.",
    },
    SuggestionRule {
        triggers: &["machine", "learning"],
        suggestion: "Include Machine Learning projects or skills.",
    },
    SuggestionRule {
        triggers: &["team"],
        suggestion: "Show teamwork or collaboration experience.",
    },
    SuggestionRule {
        triggers: &["project"],
        suggestion: "Add details about relevant projects.",
    },
    SuggestionRule {
        triggers: &["experience"],
        suggestion: "Clearly state your years of experience.",
    },
];

/// Lower-cased whitespace tokens with surrounding punctuation trimmed.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn has_prefix(words: &HashSet<String>, prefix: &str) -> bool {
    words.iter().any(|word| word.starts_with(prefix))
}

#[derive(Debug, Default)]
pub struct SuggestionGenerator;

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Improvement tips in rule order, or the single fallback tip when the
    /// resume already covers every trigger.
    pub fn generate(&self, resume_text: &str, job_text: &str) -> Vec<String> {
        let resume_words = tokenize(resume_text);
        let job_words = tokenize(job_text);

        let mut suggestions: Vec<String> = RULES
            .iter()
            .filter(|rule| {
                rule.triggers.iter().any(|trigger| {
                    has_prefix(&job_words, trigger) && !has_prefix(&resume_words, trigger)
                })
            })
            .map(|rule| rule.suggestion.to_string())
            .collect();

        if suggestions.is_empty() {
            suggestions.push(FALLBACK_SUGGESTION.to_string());
        }

        suggestions
    }
}

pub fn generate_improvement_suggestions(resume_text: &str, job_text: &str) -> Vec<String> {
    SuggestionGenerator::new().generate(resume_text, job_text)
}
