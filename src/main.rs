//! Resume matcher: resume scoring, ATS matching and job recommendations

use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, OutputArgs, DOCUMENT_EXTENSIONS};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::jobs::{find_job, load_jobs, JobRecord};
use resume_matcher::input::InputManager;
use resume_matcher::output::{save_report_to_file, suggest_filename, Report, ReportGenerator};
use resume_matcher::processing::analyzer::ResumeAnalyzer;
use resume_matcher::processing::experience::{OrganizationRecognizer, PatternOrganizationRecognizer};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    let mut input_manager = InputManager::new();

    match command {
        Commands::Analyze {
            resume,
            ner,
            output,
        } => {
            let format = resolve_format(&output, &config)?;
            let resume_text = read_document(&mut input_manager, &resume, "resume").await?;

            let recognizer: Option<Arc<dyn OrganizationRecognizer>> = if ner {
                Some(Arc::new(PatternOrganizationRecognizer::new()))
            } else {
                None
            };
            let analyzer = ResumeAnalyzer::without_embeddings(&config, recognizer)?;

            info!("Analyzing resume {}", resume.display());
            let analysis = analyzer.analyze(&resume_text);
            emit(&Report::Analysis(&analysis), format, &output, &config, &resume, "analysis")?;
        }

        Commands::Score {
            resume,
            job,
            output,
        } => {
            let format = resolve_format(&output, &config)?;
            let resume_text = read_document(&mut input_manager, &resume, "resume").await?;
            let job_text = read_document(&mut input_manager, &job, "job description").await?;

            let analyzer = load_analyzer(&config, format)?;
            let result = analyzer.ats_score(&resume_text, &job_text)?;
            emit(&Report::Ats(&result), format, &output, &config, &resume, "score")?;
        }

        Commands::Recommend {
            resume,
            jobs,
            top,
            all_statuses,
            output,
        } => {
            let format = resolve_format(&output, &config)?;
            let resume_text = read_document(&mut input_manager, &resume, "resume").await?;
            let jobs = load_jobs(&jobs).await?;
            let candidates = select_jobs(jobs, all_statuses);

            let analyzer = load_analyzer(&config, format)?;
            let mut batch = analyzer.recommend_jobs(&resume_text, &candidates);
            batch.recommendations.truncate(top.unwrap_or(config.output.top_n));

            emit(&Report::Recommendations(&batch), format, &output, &config, &resume, "recommendations")?;
        }

        Commands::Gap {
            resume,
            jobs,
            job_id,
            output,
        } => {
            let format = resolve_format(&output, &config)?;
            let resume_text = read_document(&mut input_manager, &resume, "resume").await?;
            let jobs = load_jobs(&jobs).await?;
            let job = find_job(&jobs, &job_id)?;

            let analyzer = load_analyzer(&config, format)?;
            let report = analyzer.skills_gap(&resume_text, job)?;
            emit(&Report::SkillsGap(&report), format, &output, &config, &resume, "gap")?;
        }

        Commands::Skills { file, output } => {
            let format = resolve_format(&output, &config)?;
            let text = read_document(&mut input_manager, &file, "document").await?;

            let analyzer = ResumeAnalyzer::without_embeddings(&config, None)?;
            let skills = analyzer.extract_skills(&text);
            emit(&Report::Skills(&skills), format, &output, &config, &file, "skills")?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Models Directory: {}", config.models.models_dir.display());
                println!("Embedding Model: {}", config.models.embedding_model);
                println!("\nScoring Weights:");
                println!("  Semantic: {:.1}%", config.scoring.semantic_weight * 100.0);
                println!("  Keywords: {:.1}%", config.scoring.keyword_weight * 100.0);
                println!("  Structure: {:.1}%", config.scoring.structure_weight * 100.0);
                match config.scoring.score_floor {
                    Some(floor) => println!(
                        "  Score range: {:.0} - {:.0}",
                        floor, config.scoring.score_ceiling
                    ),
                    None => println!("  Score ceiling: {:.0} (no floor)", config.scoring.score_ceiling),
                }
                println!("\nSkill matching: {:?}", config.extraction.match_mode);
                if let Some(path) = &config.extraction.taxonomy_path {
                    println!("Skill taxonomy: {}", path.display());
                }
                println!("Output: {:?} (top {})", config.output.format, config.output.top_n);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn resolve_format(output: &OutputArgs, config: &Config) -> Result<OutputFormat> {
    match &output.output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn read_document(input_manager: &mut InputManager, path: &Path, role: &str) -> Result<String> {
    cli::validate_file_extension(path, DOCUMENT_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("{} file: {}", role, e)))?;
    input_manager.load_text(path, role).await
}

/// Only active listings are recommended unless every status is requested
fn select_jobs(jobs: Vec<JobRecord>, all_statuses: bool) -> Vec<JobRecord> {
    let total = jobs.len();
    let selected: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| all_statuses || job.is_active())
        .collect();
    info!("Considering {} of {} job listings", selected.len(), total);
    selected
}

/// Full analyzer with the embedding model, for the scoring commands
fn load_analyzer(config: &Config, format: OutputFormat) -> Result<ResumeAnalyzer> {
    let spinner = (format == OutputFormat::Console).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Loading embedding model {}", config.models.embedding_model));
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    });

    let analyzer = ResumeAnalyzer::from_config(config, None);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    analyzer
}

fn emit(
    report: &Report<'_>,
    format: OutputFormat,
    output: &OutputArgs,
    config: &Config,
    source: &Path,
    command: &str,
) -> Result<()> {
    let detailed = output.detailed || config.output.detailed;
    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
    println!("{}", generator.generate_report(report, &format)?);

    if let Some(save_path) = &output.save {
        let target = if save_path.is_dir() {
            save_path.join(suggest_filename(&format, &source.to_string_lossy(), command, true))
        } else {
            save_path.clone()
        };

        // Files never get ANSI color codes
        let plain = ReportGenerator::with_options(false, detailed, true, true);
        save_report_to_file(&plain.generate_report(report, &format)?, &target)?;
        info!("Report saved to {}", target.display());
    }

    Ok(())
}
