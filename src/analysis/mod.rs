pub mod pipeline;
pub mod scorer;
pub mod signals;
pub mod skill_extractor;
pub mod suggestions;

pub use pipeline::{feedback_file_names, feedback_text, AnalysisPipeline};
pub use scorer::{score, Scorer};
pub use skill_extractor::{extract_skills, SkillExtractor};
pub use suggestions::{generate_improvement_suggestions, SuggestionGenerator};
