//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for resumes and job descriptions
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(version)]
#[command(about = "Resume scoring, ATS matching and job recommendations")]
#[command(long_about = "Extract skills and experience from a resume, score it against job descriptions, rank job listings and report skills gaps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options shared by every reporting command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include every detail in console output
    #[arg(short, long)]
    pub detailed: bool,

    /// Save the report to a file, or into a directory under a generated name
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume: skills, experience, structure and suggestions
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Recognize organization names in the resume
        #[arg(long)]
        ner: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score a resume against one job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank job listings for a resume
    Recommend {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// JSON file holding an array of job records
        #[arg(long)]
        jobs: PathBuf,

        /// Number of recommendations to show (defaults to output.top_n)
        #[arg(short, long)]
        top: Option<usize>,

        /// Include filled and expired listings
        #[arg(long)]
        all_statuses: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare a resume with one job's required and preferred skills
    Gap {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// JSON file holding an array of job records
        #[arg(long)]
        jobs: PathBuf,

        /// Id of the job to compare against
        #[arg(long)]
        job_id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the taxonomy skills found in any document
    Skills {
        /// Document to scan (PDF, TXT, MD)
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "-v",
            "recommend",
            "--resume",
            "cv.pdf",
            "--jobs",
            "jobs.json",
            "--top",
            "3",
            "-o",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Recommend {
                top,
                all_statuses,
                output,
                ..
            } => {
                assert_eq!(top, Some(3));
                assert!(!all_statuses);
                assert_eq!(output.output.as_deref(), Some("json"));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), DOCUMENT_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), DOCUMENT_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), DOCUMENT_EXTENSIONS).is_err());
    }
}
