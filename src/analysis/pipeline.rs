use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::scorer::Scorer;
use crate::analysis::signals::{describe_experience, education_lines};
use crate::analysis::skill_extractor::SkillExtractor;
use crate::analysis::suggestions::SuggestionGenerator;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::input::{extract_document, extract_resume, file_label};
use crate::llm::{FeedbackProvider, FeedbackRequest};
use crate::models::{BatchEntry, DocumentText, ResumeReport};
use crate::storage::Storage;

pub struct AnalysisPipeline {
    feedback: Option<Arc<dyn FeedbackProvider>>,
    scorer: Scorer,
    suggestion_generator: SuggestionGenerator,
    skill_extractor: SkillExtractor,
    storage: Storage,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(storage: Storage, config: PipelineConfig) -> Self {
        Self {
            feedback: None,
            scorer: Scorer::new(),
            suggestion_generator: SuggestionGenerator::new(),
            skill_extractor: SkillExtractor::new(),
            storage,
            config,
        }
    }

    pub fn with_feedback(mut self, provider: impl FeedbackProvider + 'static) -> Self {
        self.feedback = Some(Arc::new(provider));
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Hands the storage handle back so the caller can close it.
    pub fn into_storage(self) -> Storage {
        self.storage
    }

    /// Scores every resume against the job posting. A resume that cannot be
    /// read is reported as failed and the rest of the batch continues; only a
    /// missing or unreadable job posting fails the whole call.
    pub async fn analyze(&self, resume_paths: &[PathBuf], job_path: &Path) -> Result<Vec<BatchEntry>> {
        tracing::info!("Reading job description: {}", job_path.display());
        let job_text = extract_document(job_path)?;
        let job_name = file_label(job_path);

        let pb = ProgressBar::new(resume_paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} resumes")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut entries = Vec::with_capacity(resume_paths.len());

        for path in resume_paths {
            let resume_name = file_label(path);

            let entry = match extract_resume(path) {
                Ok(resume_text) => {
                    let report = self
                        .analyze_text(&resume_name, &resume_text, &job_name, &job_text)
                        .await?;
                    BatchEntry::Analyzed(report)
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", resume_name, e);
                    BatchEntry::Failed {
                        resume_name,
                        error: e.to_string(),
                    }
                }
            };

            entries.push(entry);
            pb.inc(1);
        }

        pb.finish_with_message("Analysis complete");

        let analyzed = entries.iter().filter(|e| e.report().is_some()).count();
        tracing::info!("Analyzed {} of {} resumes", analyzed, entries.len());

        Ok(entries)
    }

    /// Scores already extracted text, records it in history and gathers the
    /// supporting details for the report.
    pub async fn analyze_text(
        &self,
        resume_name: &str,
        resume_text: &DocumentText,
        job_name: &str,
        job_text: &DocumentText,
    ) -> Result<ResumeReport> {
        let resume = resume_text.as_str();
        let job = job_text.as_str();

        let breakdown = self.scorer.score(resume, job);
        tracing::info!("{}: {}% match", resume_name, breakdown.final_score());

        self.storage
            .insert_analysis(resume_name, job_name, breakdown.normalized())?;

        let ai_feedback = self.request_feedback(resume_name, resume_text, job_text).await;

        Ok(ResumeReport {
            resume_name: resume_name.to_string(),
            job_name: job_name.to_string(),
            breakdown,
            match_level: breakdown.match_level(),
            suggestions: self.suggestion_generator.generate(resume, job),
            missing_keywords: self.skill_extractor.missing_keywords(resume, job),
            highlights: self.skill_extractor.highlights(resume),
            resume_skills: self.skill_extractor.resume_skills(resume).into_iter().collect(),
            job_skill_overlap: self.skill_extractor.job_overlap(resume, job),
            education: education_lines(resume),
            experience: describe_experience(resume),
            ai_feedback,
        })
    }

    async fn request_feedback(
        &self,
        resume_name: &str,
        resume_text: &DocumentText,
        job_text: &DocumentText,
    ) -> Option<String> {
        let provider = self.feedback.as_ref()?;
        let request = FeedbackRequest::new(resume_text, job_text, self.config.excerpt_chars);

        match provider.feedback(request).await {
            Ok(feedback) => Some(feedback),
            Err(e) => {
                tracing::warn!("{} feedback failed for {}: {}", provider.name(), resume_name, e);
                None
            }
        }
    }
}

/// Plain-text feedback document for one resume: AI commentary when present,
/// the match verdict and the suggestions.
pub fn feedback_text(report: &ResumeReport) -> String {
    let mut output = String::new();

    if let Some(ref feedback) = report.ai_feedback {
        output.push_str(&format!("AI Feedback:\n{}\n\n", feedback));
    }

    output.push_str(&format!("Match Analysis: {}\n\n", report.match_level.message()));

    output.push_str("Suggestions:\n");
    for tip in &report.suggestions {
        output.push_str(&format!("- {}\n", tip));
    }
    output.push('\n');

    output
}

/// File name for each report's feedback document, `<resume>_feedback.txt`.
/// Resumes sharing a file name (from different directories) get `_2`, `_3`
/// and so on, so no document overwrites another.
pub fn feedback_file_names<'a>(
    reports: impl IntoIterator<Item = &'a ResumeReport>,
) -> Vec<(String, &'a ResumeReport)> {
    let mut taken = HashSet::new();

    reports
        .into_iter()
        .map(|report| {
            let mut name = format!("{}_feedback.txt", report.resume_name);
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}_feedback_{}.txt", report.resume_name, n);
                n += 1;
            }
            (name, report)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::extractor::tests::write_docx;
    use crate::models::MatchLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedFeedback {
        requests: Arc<Mutex<Vec<FeedbackRequest>>>,
    }

    #[async_trait]
    impl FeedbackProvider for CannedFeedback {
        async fn feedback(&self, request: FeedbackRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            Ok("Strong Python background.".to_string())
        }

        fn name(&self) -> &str {
            "Canned"
        }
    }

    struct FailingFeedback;

    #[async_trait]
    impl FeedbackProvider for FailingFeedback {
        async fn feedback(&self, _request: FeedbackRequest) -> Result<String> {
            Err(Error::LLMApi("quota exceeded".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    fn fixture(dir: &Path) -> (Vec<PathBuf>, PathBuf) {
        let job = dir.join("backend.txt");
        std::fs::write(&job, "Requires python and teamwork on real projects using django").unwrap();

        let good = dir.join("alice.docx");
        write_docx(
            &good,
            &[
                "I have experience with python and sql, worked at a university",
                "Bachelor of Engineering",
                "4 years building APIs",
            ],
        );

        let unsupported = dir.join("bob.odt");
        std::fs::write(&unsupported, "python").unwrap();

        let corrupt = dir.join("carol.docx");
        std::fs::write(&corrupt, "not a zip").unwrap();

        (vec![unsupported, good, corrupt], job)
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let (resumes, job) = fixture(dir.path());

        let pipeline = AnalysisPipeline::new(Storage::in_memory().unwrap(), PipelineConfig::default());
        let entries = pipeline.analyze(&resumes, &job).await.unwrap();

        assert_eq!(entries.len(), 3);
        assert!(matches!(entries[0], BatchEntry::Failed { ref resume_name, .. } if resume_name == "bob.odt"));
        assert!(matches!(entries[2], BatchEntry::Failed { .. }));

        let report = entries[1].report().unwrap();
        assert_eq!(report.resume_name, "alice.docx");
        assert_eq!(report.job_name, "backend.txt");
        assert_eq!(report.breakdown.skill_score(), 30);
        assert_eq!(report.match_level, MatchLevel::Low);
        assert_eq!(report.experience, "4 years");
        assert_eq!(report.education, vec!["bachelor of engineering"]);
        assert_eq!(report.missing_keywords, vec!["django"]);
        assert!(report.ai_feedback.is_none());
        assert_eq!(
            report.suggestions,
            vec![
                "Show teamwork or collaboration experience.",
                "Add details about relevant projects.",
            ]
        );

        let history = pipeline.storage().fetch_all_analysis().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].resume_name, "alice.docx");
        assert_eq!(history[0].score, report.breakdown.normalized());
    }

    #[tokio::test]
    async fn test_feedback_request_is_truncated() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let pipeline = AnalysisPipeline::new(
            Storage::in_memory().unwrap(),
            PipelineConfig { excerpt_chars: 10 },
        )
        .with_feedback(CannedFeedback {
            requests: requests.clone(),
        });

        let report = pipeline
            .analyze_text(
                "cv.pdf",
                &DocumentText::new("python developer with sql"),
                "job.txt",
                &DocumentText::new("python backend engineer"),
            )
            .await
            .unwrap();

        assert_eq!(report.ai_feedback.as_deref(), Some("Strong Python background."));
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].resume_excerpt, "python dev");
        assert_eq!(requests[0].job_excerpt, "python bac");
    }

    #[tokio::test]
    async fn test_feedback_failure_is_skipped() {
        let pipeline = AnalysisPipeline::new(Storage::in_memory().unwrap(), PipelineConfig::default())
            .with_feedback(FailingFeedback);

        let report = pipeline
            .analyze_text(
                "cv.pdf",
                &DocumentText::new("python"),
                "job.txt",
                &DocumentText::new("python"),
            )
            .await
            .unwrap();

        assert!(report.ai_feedback.is_none());
        assert_eq!(pipeline.storage().count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_job_fails_call() {
        let pipeline = AnalysisPipeline::new(Storage::in_memory().unwrap(), PipelineConfig::default());
        let result = pipeline
            .analyze(&[PathBuf::from("cv.pdf")], Path::new("/nonexistent/job.txt"))
            .await;
        assert!(result.is_err());
        assert_eq!(pipeline.storage().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_feedback_file_names_do_not_collide() {
        let pipeline = AnalysisPipeline::new(Storage::in_memory().unwrap(), PipelineConfig::default());
        let job = DocumentText::new("python");
        let mut reports = Vec::new();
        for name in ["cv.pdf", "other.docx", "cv.pdf", "cv.pdf"] {
            let report = pipeline
                .analyze_text(name, &DocumentText::new("python"), "job.txt", &job)
                .await
                .unwrap();
            reports.push(report);
        }

        let names: Vec<String> = feedback_file_names(&reports)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "cv.pdf_feedback.txt",
                "other.docx_feedback.txt",
                "cv.pdf_feedback_2.txt",
                "cv.pdf_feedback_3.txt",
            ]
        );
    }

    #[tokio::test]
    async fn test_feedback_text_layout() {
        let pipeline = AnalysisPipeline::new(Storage::in_memory().unwrap(), PipelineConfig::default());
        let mut report = pipeline
            .analyze_text("cv.pdf", &DocumentText::new(""), "job.txt", &DocumentText::new("python"))
            .await
            .unwrap();
        report.ai_feedback = Some("Needs work.".to_string());

        assert_eq!(
            feedback_text(&report),
            "AI Feedback:\nNeeds work.\n\n\
             Match Analysis: Low match.\n\n\
             Suggestions:\n- Mention Python if you have experience with it.\n\n"
        );
    }
}
