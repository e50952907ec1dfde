use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resumematch::analysis::{feedback_file_names, feedback_text};
use resumematch::models::{AnalysisRecord, BatchEntry, ResumeReport};
use resumematch::{AnalysisPipeline, Config, OpenAIProvider, PipelineConfig, Storage};

#[derive(Parser, Debug)]
#[command(name = "resumematch")]
#[command(version = "0.1.0")]
#[command(about = "Score resumes against a job description and suggest improvements")]
struct Args {
    /// Database path for analysis history (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one or more resumes against a job description
    Analyze {
        /// Resume file (PDF or DOCX); repeat for several resumes
        #[arg(short, long = "resume", required = true)]
        resumes: Vec<PathBuf>,

        /// Job description file (TXT, PDF or DOCX)
        #[arg(short, long)]
        job: PathBuf,

        /// Ask the language model for detailed feedback
        #[arg(long)]
        ai_feedback: bool,

        /// Output format (json, text, markdown)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory to write a <resume>_feedback.txt file per resume
        #[arg(long)]
        feedback_dir: Option<PathBuf>,
    },
    /// Show past analyses, newest first
    History {
        /// Only show records whose resume or job name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output format (json, text, markdown)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("resumematch=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let database = args.database.clone().unwrap_or_else(|| config.database_path.clone());

    match args.command {
        Command::Analyze {
            resumes,
            job,
            ai_feedback,
            format,
            output,
            feedback_dir,
        } => {
            let storage = Storage::new(&database)?;
            let mut pipeline = AnalysisPipeline::new(storage, PipelineConfig::from(&config));

            if ai_feedback {
                let provider = OpenAIProvider::with_base_url(
                    config.require_api_key()?,
                    Some(config.openai_model.clone()),
                    &config.openai_base_url,
                )?;
                pipeline = pipeline.with_feedback(provider);
            }

            let entries = pipeline.analyze(&resumes, &job).await?;

            if let Some(ref dir) = feedback_dir {
                write_feedback_files(&entries, dir)?;
            }

            let rendered = match format.as_str() {
                "json" => serde_json::to_string_pretty(&entries)?,
                "markdown" => format_markdown(&entries),
                _ => format_text(&entries),
            };
            emit(&rendered, output.as_deref())?;

            pipeline.into_storage().close()?;
        }
        Command::History { search, format } => {
            let storage = Storage::new(&database)?;
            let records = match search {
                Some(ref term) => storage.search_analysis(term)?,
                None => storage.fetch_all_analysis()?,
            };

            let rendered = match format.as_str() {
                "json" => serde_json::to_string_pretty(&records)?,
                "markdown" => format_history_markdown(&records),
                _ => format_history_text(&records),
            };
            emit(&rendered, None)?;

            storage.close()?;
        }
    }

    Ok(())
}

fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        tracing::info!("Output written to: {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn write_feedback_files(entries: &[BatchEntry], dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;

    for (name, report) in feedback_file_names(entries.iter().filter_map(BatchEntry::report)) {
        let path = dir.join(name);
        std::fs::write(&path, feedback_text(report))?;
        tracing::info!("Feedback written to: {}", path.display());
    }

    Ok(())
}

fn format_text(entries: &[BatchEntry]) -> String {
    let mut output = String::new();

    for entry in entries {
        match entry {
            BatchEntry::Analyzed(report) => output.push_str(&format_report_text(report)),
            BatchEntry::Failed { resume_name, error } => {
                output.push_str(&format!("\n=== {} ===\n\nCould not analyze: {}\n", resume_name, error));
            }
        }
    }

    output
}

fn format_report_text(report: &ResumeReport) -> String {
    let mut output = String::new();
    let b = &report.breakdown;

    output.push_str(&format!("\n=== {} vs {} ===\n\n", report.resume_name, report.job_name));
    output.push_str(&format!("Final Match: {}% ({})\n\n", b.final_score(), report.match_level.message()));

    output.push_str("Breakdown:\n");
    output.push_str(&format!("  Skill Match:      {}%\n", b.skill_score()));
    output.push_str(&format!("  Experience Match: {}%\n", b.experience_score()));
    output.push_str(&format!("  Education Match:  {}%\n", b.education_score()));

    output.push_str(&format!("\nStated Experience: {}\n", report.experience));
    if !report.education.is_empty() {
        output.push_str("Education:\n");
        for line in &report.education {
            output.push_str(&format!("  - {}\n", line));
        }
    }

    if let Some(ref feedback) = report.ai_feedback {
        output.push_str(&format!("\nAI Feedback:\n{}\n", feedback));
    }

    output.push_str("\nSuggestions to Improve:\n");
    for tip in &report.suggestions {
        output.push_str(&format!("  * {}\n", tip));
    }

    if report.missing_keywords.is_empty() {
        output.push_str("\nYour resume includes all key job keywords!\n");
    } else {
        output.push_str(&format!(
            "\nMissing job keywords: {}\n",
            report.missing_keywords.join(", ")
        ));
    }

    if !report.highlights.found.is_empty() {
        output.push_str(&format!("Skills Found: {}\n", report.highlights.found.join(", ")));
    }
    if !report.highlights.missing.is_empty() {
        output.push_str(&format!("Skills Missing: {}\n", report.highlights.missing.join(", ")));
    }

    output.push_str(&format!("Job Skill Overlap: {:.2}%\n", report.job_skill_overlap));

    output
}

fn format_markdown(entries: &[BatchEntry]) -> String {
    let mut output = String::new();

    output.push_str("# Resume Match Scores\n\n");
    output.push_str("| Resume | Final | Skills | Experience | Education | Verdict |\n");
    output.push_str("|--------|-------|--------|------------|-----------|---------|\n");

    for entry in entries {
        match entry {
            BatchEntry::Analyzed(report) => {
                let b = &report.breakdown;
                output.push_str(&format!(
                    "| {} | {}% | {}% | {}% | {}% | {} |\n",
                    report.resume_name,
                    b.final_score(),
                    b.skill_score(),
                    b.experience_score(),
                    b.education_score(),
                    report.match_level
                ));
            }
            BatchEntry::Failed { resume_name, error } => {
                output.push_str(&format!("| {} | - | - | - | - | {} |\n", resume_name, error));
            }
        }
    }

    for report in entries.iter().filter_map(BatchEntry::report) {
        output.push_str(&format!("\n## {}\n\n", report.resume_name));

        if let Some(ref feedback) = report.ai_feedback {
            output.push_str(&format!("> {}\n\n", feedback.replace('\n', "\n> ")));
        }

        output.push_str("**Suggestions**\n\n");
        for tip in &report.suggestions {
            output.push_str(&format!("- {}\n", tip));
        }

        if !report.missing_keywords.is_empty() {
            output.push_str(&format!(
                "\n**Missing keywords:** {}\n",
                report.missing_keywords.join(", ")
            ));
        }

        output.push_str(&format!(
            "\n**Skills found:** {}\n\n**Skills missing:** {}\n",
            report.highlights.found.join(", "),
            report.highlights.missing.join(", ")
        ));
    }

    output
}

fn format_history_text(records: &[AnalysisRecord]) -> String {
    if records.is_empty() {
        return "No analysis history found.".to_string();
    }

    records
        .iter()
        .map(|r| {
            format!(
                "Resume: {} | Job: {} | Score: {}% | {}",
                r.resume_name,
                r.job_name,
                r.score_percent(),
                r.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_history_markdown(records: &[AnalysisRecord]) -> String {
    let mut output = String::new();

    output.push_str("# Analysis History\n\n");
    output.push_str("| Resume | Job | Score | Analyzed |\n|--------|-----|-------|----------|\n");

    for r in records {
        output.push_str(&format!(
            "| {} | {} | {}% | {} |\n",
            r.resume_name,
            r.job_name,
            r.score_percent(),
            r.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
