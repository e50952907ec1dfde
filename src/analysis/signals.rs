use std::sync::OnceLock;

use regex::Regex;

use crate::keywords::EDUCATION_LINE_KEYWORDS;

pub const EXPERIENCE_NOT_FOUND: &str = "Not clearly mentioned";

fn years_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\+?\s+years?").expect("valid years pattern"))
}

/// Lower-cased lines that mention a degree or field of study.
pub fn education_lines(text: &str) -> Vec<String> {
    text.to_lowercase()
        .lines()
        .filter(|line| EDUCATION_LINE_KEYWORDS.iter().any(|keyword| line.contains(keyword)))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Largest "N years" / "N+ years" figure stated in the text.
pub fn years_of_experience(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    years_pattern()
        .captures_iter(&lowered)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

pub fn describe_experience(text: &str) -> String {
    match years_of_experience(text) {
        Some(years) => format!("{} years", years),
        None => EXPERIENCE_NOT_FOUND.to_string(),
    }
}
