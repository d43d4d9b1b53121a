//! Output formatters for analysis results: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::analyzer::ResumeAnalysis;
use crate::processing::ats_matcher::AtsResult;
use crate::processing::gap_analysis::{SkillCoverage, SkillsGapReport};
use crate::processing::recommender::RecommendationBatch;
use crate::processing::skill_extractor::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

/// Any result the engine can hand to a formatter
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Analysis(&'a ResumeAnalysis),
    Ats(&'a AtsResult),
    Recommendations(&'a RecommendationBatch),
    SkillsGap(&'a SkillsGapReport),
    Skills(&'a SkillSet),
}

pub trait OutputFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and API integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn category_label(category: &str) -> String {
    category
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f32) -> String {
        let (badge, color) = match score.round() as u8 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_skill_set(&self, skills: &SkillSet, output: &mut String) {
        for (category, found) in &skills.skills_by_category {
            if found.is_empty() && !self.detailed {
                continue;
            }
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(&category_label(category), Color::Cyan),
                join_or_none(found)
            ));
        }
        if skills.is_empty() {
            output.push_str("  No skills from the taxonomy were found\n");
        }
    }

    fn format_coverage(&self, title: &str, coverage: &SkillCoverage, output: &mut String) {
        output.push_str(&self.format_header(title, 3));
        output.push_str(&format!("Match: {:.2}%\n", coverage.match_percentage));
        output.push_str(&format!(
            "✅ Have: {}\n",
            self.colorize(&join_or_none(&coverage.matching), Color::Green)
        ));
        output.push_str(&format!(
            "❌ Missing: {}\n",
            self.colorize(&join_or_none(&coverage.missing), Color::Red)
        ));
    }

    fn format_analysis(&self, analysis: &ResumeAnalysis) -> String {
        let mut output = self.format_header("📄 RESUME ANALYSIS", 1);

        output.push_str(&format!(
            "Structure Score: {:.2}% {}\n",
            analysis.structure_score,
            self.format_score_badge(analysis.structure_score)
        ));
        output.push_str(&format!(
            "Words: {} | Characters: {}\n",
            analysis.word_count, analysis.character_count
        ));
        if !analysis.missing_sections.is_empty() {
            let missing: Vec<String> = analysis.missing_sections.iter().map(|s| s.to_string()).collect();
            output.push_str(&format!(
                "Missing sections: {}\n",
                self.colorize(&missing.join(", "), Color::Red)
            ));
        }

        output.push_str(&self.format_header(&format!("Skills ({})", analysis.skills.len()), 2));
        self.format_skill_set(&analysis.skills, &mut output);

        output.push_str(&self.format_header("Experience", 2));
        output.push_str(&format!(
            "Years of experience: {}\n",
            analysis.experience.years_of_experience
        ));
        if !analysis.experience.companies.is_empty() || self.detailed {
            output.push_str(&format!(
                "Organizations: {}\n",
                join_or_none(&analysis.experience.companies)
            ));
        }

        output.push_str(&self.format_header("Suggestions", 2));
        if analysis.suggestions.is_empty() {
            output.push_str(&self.colorize("No suggestions, the resume covers the basics\n", Color::Green));
        }
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. 💡 {}\n", i + 1, suggestion));
        }

        output
    }

    fn format_ats(&self, result: &AtsResult) -> String {
        let mut output = self.format_header("📊 ATS SCORE", 1);

        output.push_str(&format!(
            "Score: {:.2}% {}\n",
            result.score,
            self.format_score_badge(result.score)
        ));
        if self.detailed || (result.raw_score - result.score).abs() > f32::EPSILON {
            output.push_str(&format!("Raw score: {:.2}%\n", result.raw_score));
        }

        output.push_str(&self.format_header("Score Breakdown", 2));
        output.push_str(&format!(
            "🎯 Semantic similarity: {:.1}%\n",
            result.components.semantic * 100.0
        ));
        output.push_str(&format!(
            "🔍 Keyword coverage: {:.1}%\n",
            result.components.keyword * 100.0
        ));
        output.push_str(&format!(
            "📐 Structure: {:.1}%\n",
            result.components.structure * 100.0
        ));

        output.push_str(&self.format_header("Skills", 2));
        let matching: Vec<String> = result.matching_skills.iter().cloned().collect();
        let missing: Vec<String> = result.missing_skills.iter().cloned().collect();
        output.push_str(&format!(
            "✅ Matching: {}\n",
            self.colorize(&join_or_none(&matching), Color::Green)
        ));
        output.push_str(&format!(
            "❌ Missing: {}\n",
            self.colorize(&join_or_none(&missing), Color::Red)
        ));

        if self.detailed {
            let resume: Vec<String> = result.resume_skills.iter().cloned().collect();
            let job: Vec<String> = result.job_skills.iter().cloned().collect();
            output.push_str(&format!("Resume skills: {}\n", join_or_none(&resume)));
            output.push_str(&format!("Job skills: {}\n", join_or_none(&job)));
        }

        output
    }

    fn format_recommendations(&self, batch: &RecommendationBatch) -> String {
        let mut output = self.format_header("💼 JOB RECOMMENDATIONS", 1);
        output.push_str(&format!(
            "Showing {} of {} jobs\n",
            batch.recommendations.len(),
            batch.total_jobs
        ));

        for (i, rec) in batch.recommendations.iter().enumerate() {
            output.push_str(&self.format_header(
                &format!("{}. {} at {}", i + 1, rec.title, rec.company),
                2,
            ));
            output.push_str(&format!(
                "ATS Score: {:.2}% {} | Required skills matched: {:.2}%\n",
                rec.ats_score,
                self.format_score_badge(rec.ats_score),
                rec.match_percentage
            ));
            if !rec.location.is_empty() {
                output.push_str(&format!("Location: {}\n", rec.location));
            }
            if let Some(job_type) = &rec.job_type {
                output.push_str(&format!("Type: {}\n", job_type));
            }
            if let Some(salary) = &rec.salary_range {
                if let (Some(min), Some(max)) = (salary.min, salary.max) {
                    output.push_str(&format!("Salary: {:.0} - {:.0} {}\n", min, max, salary.currency));
                }
            }
            output.push_str(&format!(
                "✅ Matching: {}\n",
                self.colorize(&join_or_none(&rec.matching_skills), Color::Green)
            ));
            output.push_str(&format!(
                "❌ Missing: {}\n",
                self.colorize(&join_or_none(&rec.missing_skills), Color::Red)
            ));
            if self.detailed {
                output.push_str(&format!("Job id: {}\n", rec.job_id));
            }
        }

        if !batch.failures.is_empty() {
            output.push_str(&self.format_header("Jobs that could not be scored", 2));
            for failure in &batch.failures {
                output.push_str(&format!(
                    "⚠️  {} ({}): {}\n",
                    failure.title,
                    failure.job_id,
                    self.colorize(&failure.error, Color::Red)
                ));
            }
        }

        output
    }

    fn format_gap(&self, report: &SkillsGapReport) -> String {
        let mut output = self.format_header("🧭 SKILLS GAP ANALYSIS", 1);
        output.push_str(&format!("Job: {} at {} ({})\n", report.job_title, report.company, report.job_id));
        output.push_str(&format!(
            "ATS Score: {:.2}% {}\n",
            report.ats_score,
            self.format_score_badge(report.ats_score)
        ));

        self.format_coverage("Required Skills", &report.required_skills, &mut output);
        self.format_coverage("Preferred Skills", &report.preferred_skills, &mut output);

        output.push_str(&self.format_header("Recommendations", 2));
        if report.recommendations.is_empty() {
            output.push_str(&self.colorize("You cover every listed skill\n", Color::Green));
        }
        for (i, advice) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, advice));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        Ok(match report {
            Report::Analysis(analysis) => self.format_analysis(analysis),
            Report::Ats(result) => self.format_ats(result),
            Report::Recommendations(batch) => self.format_recommendations(batch),
            Report::SkillsGap(gap) => self.format_gap(gap),
            Report::Skills(skills) => {
                let mut output = self.format_header(&format!("🛠  SKILLS ({})", skills.len()), 1);
                self.format_skill_set(skills, &mut output);
                output
            }
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        match report {
            Report::Analysis(analysis) => self.to_json(analysis),
            Report::Ats(result) => self.to_json(result),
            Report::Recommendations(batch) => self.to_json(batch),
            Report::SkillsGap(gap) => self.to_json(gap),
            Report::Skills(skills) => self.to_json(skills),
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f32) -> &'static str {
        match score.round() as u8 {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn skills_table(skills: &SkillSet, output: &mut String) {
        output.push_str("| Category | Skills |\n");
        output.push_str("|----------|--------|\n");
        for (category, found) in &skills.skills_by_category {
            if !found.is_empty() {
                output.push_str(&format!("| {} | {} |\n", category_label(category), found.join(", ")));
            }
        }
        output.push('\n');
    }

    fn coverage_section(title: &str, coverage: &SkillCoverage, output: &mut String) {
        output.push_str(&format!("### {}\n\n", title));
        output.push_str(&format!("**Match:** {:.2}%\n\n", coverage.match_percentage));
        output.push_str(&format!("- **Have:** {}\n", join_or_none(&coverage.matching)));
        output.push_str(&format!("- **Missing:** {}\n\n", join_or_none(&coverage.missing)));
    }

    fn title(report: &Report<'_>) -> &'static str {
        match report {
            Report::Analysis(_) => "# 📄 Resume Analysis Report",
            Report::Ats(_) => "# 📊 ATS Score Report",
            Report::Recommendations(_) => "# 💼 Job Recommendations",
            Report::SkillsGap(_) => "# 🧭 Skills Gap Report",
            Report::Skills(_) => "# 🛠 Extracted Skills",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report<'_>) -> Result<String> {
        let mut output = format!("{}\n\n", Self::title(report));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                env!("CARGO_PKG_VERSION")
            ));
        }

        match report {
            Report::Analysis(analysis) => {
                output.push_str(&format!(
                    "**Structure Score:** {:.2}% {}\n\n",
                    analysis.structure_score,
                    Self::markdown_score_badge(analysis.structure_score)
                ));
                output.push_str(&format!(
                    "**Words:** {} | **Characters:** {} | **Years of experience:** {}\n\n",
                    analysis.word_count, analysis.character_count, analysis.experience.years_of_experience
                ));
                if !analysis.missing_sections.is_empty() {
                    let missing: Vec<String> =
                        analysis.missing_sections.iter().map(|s| s.to_string()).collect();
                    output.push_str(&format!("**Missing sections:** {}\n\n", missing.join(", ")));
                }

                output.push_str(&format!("## Skills ({})\n\n", analysis.skills.len()));
                Self::skills_table(&analysis.skills, &mut output);

                if !analysis.experience.companies.is_empty() {
                    output.push_str("## Organizations\n\n");
                    for company in &analysis.experience.companies {
                        output.push_str(&format!("- {}\n", company));
                    }
                    output.push('\n');
                }

                output.push_str("## Suggestions\n\n");
                for suggestion in &analysis.suggestions {
                    output.push_str(&format!("- 💡 {}\n", suggestion));
                }
            }
            Report::Ats(result) => {
                output.push_str(&format!(
                    "**ATS Score:** {:.2}% {}\n\n",
                    result.score,
                    Self::markdown_score_badge(result.score)
                ));
                output.push_str("| Component | Score |\n");
                output.push_str("|-----------|-------|\n");
                output.push_str(&format!(
                    "| 🎯 Semantic Similarity | {:.1}% |\n",
                    result.components.semantic * 100.0
                ));
                output.push_str(&format!(
                    "| 🔍 Keyword Coverage | {:.1}% |\n",
                    result.components.keyword * 100.0
                ));
                output.push_str(&format!(
                    "| 📐 Structure | {:.1}% |\n\n",
                    result.components.structure * 100.0
                ));

                let matching: Vec<String> = result.matching_skills.iter().cloned().collect();
                let missing: Vec<String> = result.missing_skills.iter().cloned().collect();
                output.push_str(&format!("- **Matching skills:** {}\n", join_or_none(&matching)));
                output.push_str(&format!("- **Missing skills:** {}\n", join_or_none(&missing)));
            }
            Report::Recommendations(batch) => {
                output.push_str("| # | Job | Company | ATS Score | Skills Match | Missing |\n");
                output.push_str("|---|-----|---------|-----------|--------------|---------|\n");
                for (i, rec) in batch.recommendations.iter().enumerate() {
                    output.push_str(&format!(
                        "| {} | {} | {} | {:.2}% | {:.2}% | {} |\n",
                        i + 1,
                        rec.title,
                        rec.company,
                        rec.ats_score,
                        rec.match_percentage,
                        join_or_none(&rec.missing_skills)
                    ));
                }
                output.push('\n');

                if !batch.failures.is_empty() {
                    output.push_str("## Jobs That Could Not Be Scored\n\n");
                    for failure in &batch.failures {
                        output.push_str(&format!(
                            "- **{}** (`{}`): {}\n",
                            failure.title, failure.job_id, failure.error
                        ));
                    }
                }
            }
            Report::SkillsGap(gap) => {
                output.push_str(&format!(
                    "**Job:** {} at {} (`{}`)\n\n",
                    gap.job_title, gap.company, gap.job_id
                ));
                output.push_str(&format!(
                    "**ATS Score:** {:.2}% {}\n\n",
                    gap.ats_score,
                    Self::markdown_score_badge(gap.ats_score)
                ));
                Self::coverage_section("Required Skills", &gap.required_skills, &mut output);
                Self::coverage_section("Preferred Skills", &gap.preferred_skills, &mut output);

                output.push_str("## Recommendations\n\n");
                for (i, advice) in gap.recommendations.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, advice));
                }
            }
            Report::Skills(skills) => Self::skills_table(skills, &mut output),
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report<'_>, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, command: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_{}{}.{}", base_name, command, timestamp_suffix, extension)
}
