//! Integration tests for the resume matcher

use resume_matcher::config::{Config, MatchMode};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::jobs::{find_job, load_jobs};
use resume_matcher::input::InputManager;
use resume_matcher::processing::ats_matcher::AtsScorer;
use resume_matcher::processing::embeddings::Embedder;
use resume_matcher::processing::experience::PatternOrganizationRecognizer;
use resume_matcher::processing::semantic::SemanticScorer;
use resume_matcher::processing::skill_extractor::SkillExtractor;
use resume_matcher::processing::taxonomy::SkillTaxonomy;
use resume_matcher::ResumeAnalyzer;
use std::path::Path;
use std::sync::Arc;

/// Same direction for every text, so semantic similarity is always 1.0
struct ConstantEmbedder;

impl Embedder for ConstantEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 1.0, 1.0])
    }

    fn model_name(&self) -> &str {
        "constant"
    }
}

/// Fails on any text mentioning the marker word
struct SelectiveFailureEmbedder(&'static str);

impl Embedder for SelectiveFailureEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains(self.0) {
            Err(ResumeMatcherError::Embedding(format!("cannot embed '{}'", self.0)))
        } else {
            Ok(vec![1.0, 1.0, 1.0])
        }
    }

    fn model_name(&self) -> &str {
        "selective"
    }
}

/// Byte histogram of the exact input, so any change in casing, spacing or
/// punctuation that reaches the model changes the vector
struct ByteHistogramEmbedder;

impl Embedder for ByteHistogramEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0; 256];
        for b in text.bytes() {
            v[b as usize] += 1.0;
        }
        Ok(v)
    }

    fn model_name(&self) -> &str {
        "byte-histogram"
    }
}

fn analyzer_with(embedder: Arc<dyn Embedder>) -> ResumeAnalyzer {
    ResumeAnalyzer::new(&Config::default(), embedder, None).unwrap()
}

async fn sample_resume() -> String {
    InputManager::new()
        .load_text(Path::new("tests/fixtures/sample_resume.txt"), "resume")
        .await
        .unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = sample_resume().await;
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Senior Software Engineer"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .load_text(Path::new("tests/fixtures/sample_resume.md"), "resume")
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Senior Software Engineer at Hooli"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.load_text(path, "resume").await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.load_text(path, "resume").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();

    let result = manager
        .load_text(Path::new("tests/fixtures/unsupported.xyz"), "resume")
        .await;
    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));

    let result = manager
        .load_text(Path::new("tests/fixtures/nonexistent.txt"), "resume")
        .await;
    assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_analyze_sample_resume() {
    let resume = sample_resume().await;
    let analyzer = ResumeAnalyzer::new(
        &Config::default(),
        Arc::new(ConstantEmbedder),
        Some(Arc::new(PatternOrganizationRecognizer::new())),
    )
    .unwrap();

    let analysis = analyzer.analyze(&resume);

    for skill in ["python", "django", "kubernetes", "aws", "leadership"] {
        assert!(analysis.skills.contains(skill), "missing {}", skill);
    }
    assert_eq!(
        analysis.skills.skills_by_category["databases"],
        vec!["postgresql".to_string(), "redis".to_string()]
    );

    assert_eq!(analysis.experience.years_of_experience, 6);
    assert_eq!(
        analysis.experience.companies,
        vec!["Hooli", "Initech LLC", "State University"]
    );
    assert_eq!(analysis.structure_score, 100.0);
    assert!(analysis.missing_sections.is_empty());

    // Short resume: the length check is the only one that fires
    assert_eq!(
        analysis.suggestions,
        vec!["Resume appears too short. Consider adding more details about your experience"]
    );
}

#[tokio::test]
async fn test_recommendations_are_ranked() {
    let resume = sample_resume().await;
    let jobs = load_jobs(Path::new("tests/fixtures/jobs.json")).await.unwrap();
    assert_eq!(jobs.len(), 3);

    let batch = analyzer_with(Arc::new(ConstantEmbedder)).recommend_jobs(&resume, &jobs);
    assert_eq!(batch.total_jobs, 3);
    assert!(batch.failures.is_empty());

    let order: Vec<&str> = batch.recommendations.iter().map(|r| r.job_id.as_str()).collect();
    assert_eq!(order, vec!["job-backend", "job-frontend", "job-data"]);

    let backend = &batch.recommendations[0];
    assert!((backend.ats_score - 100.0).abs() < 0.01);
    assert_eq!(backend.match_percentage, 100.0);
    assert!(backend.missing_skills.is_empty());
    assert_eq!(backend.salary_range.as_ref().unwrap().min, Some(120000.0));

    let frontend = &batch.recommendations[1];
    assert!((frontend.ats_score - 86.67).abs() < 0.01);
    assert_eq!(frontend.match_percentage, 33.33);
    assert_eq!(frontend.missing_skills, vec!["css", "typescript"]);

    let data = &batch.recommendations[2];
    assert!((data.ats_score - 68.0).abs() < 0.01);
    assert_eq!(data.match_percentage, 25.0);
    assert_eq!(data.matching_skills, vec!["python"]);
    assert_eq!(data.missing_skills, vec!["pandas", "tableau", "tensorflow"]);
}

#[tokio::test]
async fn test_one_failing_job_does_not_sink_the_batch() {
    let resume = sample_resume().await;
    let jobs = load_jobs(Path::new("tests/fixtures/jobs.json")).await.unwrap();

    let batch = analyzer_with(Arc::new(SelectiveFailureEmbedder("typescript")))
        .recommend_jobs(&resume, &jobs);

    assert_eq!(batch.total_jobs, 3);
    assert_eq!(batch.recommendations.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].job_id, "job-frontend");
    assert!(batch.failures[0].error.contains("typescript"));
}

#[tokio::test]
async fn test_skills_gap_reports() {
    let resume = sample_resume().await;
    let jobs = load_jobs(Path::new("tests/fixtures/jobs.json")).await.unwrap();
    let analyzer = analyzer_with(Arc::new(ConstantEmbedder));

    let backend = analyzer
        .skills_gap(&resume, find_job(&jobs, "job-backend").unwrap())
        .unwrap();
    assert_eq!(backend.required_skills.match_percentage, 100.0);
    assert_eq!(backend.preferred_skills.matching, vec!["kubernetes"]);
    assert_eq!(backend.preferred_skills.missing, vec!["terraform"]);
    assert_eq!(
        backend.recommendations,
        vec!["Consider learning these preferred skills: terraform"]
    );

    let data = analyzer
        .skills_gap(&resume, find_job(&jobs, "job-data").unwrap())
        .unwrap();
    assert_eq!(data.required_skills.match_percentage, 25.0);
    assert_eq!(
        data.recommendations,
        vec![
            "Focus on learning these required skills: pandas, tableau, tensorflow",
            "Consider learning these preferred skills: spark",
            "Highlight your relevant experience more prominently in your resume",
        ]
    );

    match find_job(&jobs, "job-bakend") {
        Err(ResumeMatcherError::NotFound(msg)) => assert!(msg.contains("job-backend")),
        other => panic!("expected NotFound, got {:?}", other.map(|j| &j.id)),
    }
}

#[test]
fn test_ats_score_ignores_case_spacing_and_punctuation() {
    let config = Config::default();
    let extractor = SkillExtractor::with_match_mode(
        SkillTaxonomy::from_config(&config.extraction).unwrap(),
        config.extraction.match_mode,
    )
    .unwrap();
    let scorer = AtsScorer::new(
        Arc::new(extractor),
        SemanticScorer::new(Arc::new(ByteHistogramEmbedder)),
        config.scoring.clone(),
    )
    .unwrap();

    let tidy = scorer.score("Python Developer", "Need Python").unwrap();
    let messy = scorer.score("python   developer", "need   python!!").unwrap();
    assert_eq!(tidy, messy);

    // The embedder itself does see the difference
    let raw = ByteHistogramEmbedder;
    assert_ne!(raw.embed("Need Python").unwrap(), raw.embed("need   python!!").unwrap());
}

#[test]
fn test_custom_taxonomy_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    std::fs::write(
        &taxonomy_path,
        "[[category]]\nname = \"systems\"\nskills = [\"rust\", \"go\", \"c++\"]\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.extraction.taxonomy_path = Some(taxonomy_path);
    config.extraction.match_mode = MatchMode::WordBoundary;

    let config_path = dir.path().join("config.toml");
    config.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    let analyzer = ResumeAnalyzer::new(&loaded, Arc::new(ConstantEmbedder), None).unwrap();
    assert_eq!(analyzer.skill_count(), 3);

    let skills = analyzer.extract_skills("Rust and Go developer, goal-oriented, trusted");
    let found: Vec<&str> = skills.all_skills.iter().map(String::as_str).collect();
    assert_eq!(found, vec!["go", "rust"]);
    assert_eq!(skills.skills_by_category.len(), 1);
}
